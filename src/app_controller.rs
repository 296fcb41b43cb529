use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::io::Write;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::ass_converter::{Converter, ConversionReport};
use crate::file_utils::{DirectorySink, DocumentSink, DocumentSource, FileManager, FileSource, StdoutSink};

// @module: Application controller for subtitle conversion

/// Result of converting one document
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Where the SRT output went
    pub output_path: PathBuf,

    /// Scanner statistics
    pub report: ConversionReport,
}

/// Totals for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Converter built from the configuration
    converter: Converter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let converter = Converter::new(config.conversion);

        Ok(Self { config, converter })
    }

    /// Convert one document from a source into a sink
    ///
    /// The sink is only asked for a destination after the conversion has
    /// succeeded, so a failure never leaves an empty output behind.
    pub fn convert_with(&self, source: &dyn DocumentSource, sink: &dyn DocumentSink) -> Result<ConversionOutcome> {
        let source_name = source.display_name();
        let output_name = self.output_filename(&source_name);
        debug!("Converting {} -> {}", source_name, output_name);

        let reader = source.open()?;
        let mut buffer = Vec::new();
        let report = self.converter.convert(reader, &mut buffer)
            .with_context(|| format!("Failed to convert {}", source_name))?;

        if !report.events_section_found {
            warn!("No [Events] section found in {}, output will be empty", source_name);
        } else if report.cues_emitted == 0 {
            warn!("No dialogue lines found in {}, output will be empty", source_name);
        }

        let (mut writer, output_path) = sink.create(&output_name)?;
        writer.write_all(&buffer)
            .and_then(|_| writer.flush())
            .with_context(|| format!("Failed to write subtitle file: {}", output_path.display()))?;

        Ok(ConversionOutcome { output_path, report })
    }

    /// Convert a single file into the given output directory
    pub fn run(&self, input_file: &Path, output_dir: &Path) -> Result<ConversionOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let source = FileSource::new(input_file);
        let sink = DirectorySink::new(output_dir, self.config.output.force_overwrite);
        let outcome = self.convert_with(&source, &sink)?;

        info!("Conversion complete: {}", outcome.output_path.display());
        debug!(
            "{} cue(s) written in {}",
            outcome.report.cues_emitted,
            Self::format_duration(start_time.elapsed())
        );

        Ok(outcome)
    }

    /// Convert a single file and print the SRT to standard output
    pub fn run_to_stdout(&self, input_file: &Path) -> Result<ConversionReport> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let outcome = self.convert_with(&FileSource::new(input_file), &StdoutSink)?;
        Ok(outcome.report)
    }

    /// Convert every ASS file under a directory next to its source
    pub fn run_folder(&self, input_dir: &Path) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let extension = self.config.output.extension_from.trim_start_matches('.');
        let ass_files = FileManager::find_files(input_dir, extension)?;

        if ass_files.is_empty() {
            warn!("No .{} files found in directory: {:?}", extension, input_dir);
            return Ok(BatchSummary::default());
        }

        let folder_pb = ProgressBar::new(ass_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Converting files");

        let mut summary = BatchSummary::default();

        for ass_file in &ass_files {
            let file_name = FileManager::file_name_of(ass_file);
            folder_pb.set_message(format!("Converting: {}", file_name));

            let output_dir = ass_file.parent().unwrap_or(input_dir);
            let sink = DirectorySink::new(output_dir, self.config.output.force_overwrite);

            let target = sink.target_path(&self.output_filename(&file_name));
            if target.exists() && !self.config.output.force_overwrite {
                debug!("Skipping {}, {} already exists", file_name, target.display());
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            match self.convert_with(&FileSource::new(ass_file), &sink) {
                Ok(outcome) => {
                    debug!("Conversion complete: {}", outcome.output_path.display());
                    summary.converted += 1;
                }
                Err(e) => {
                    error!("Error during conversion of {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder conversion completed: {} converted, {} skipped, {} errors ({})",
            summary.converted,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Destination name for a source name, per the output configuration
    pub fn output_filename(&self, source_name: &str) -> String {
        FileManager::derive_output_filename(
            source_name,
            &self.config.output.extension_from,
            &self.config.output.extension_to,
        )
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
