// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use ass2srt::app_config::{self, Config, MalformedLinePolicy, SectionMode, TimestampMode};
use ass2srt::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for ass2srt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ass2srt - ASS/SSA to SRT subtitle converter
///
/// Converts the dialogue lines of Advanced SubStation Alpha scripts into
/// numbered SubRip cues, stripping styling overrides along the way.
#[derive(Parser, Debug)]
#[command(name = "ass2srt")]
#[command(version)]
#[command(about = "Convert ASS subtitles to SRT")]
#[command(long_about = "ass2srt converts Advanced SubStation Alpha subtitles to SubRip.

EXAMPLES:
    ass2srt episode.ass                     # Writes episode.srt next to the input
    ass2srt -o out/ episode.ass             # Writes out/episode.srt
    ass2srt --stdout episode.ass            # Prints the SRT to standard output
    ass2srt -f /anime/season1/              # Converts every .ass file, overwriting
    ass2srt --skip-malformed broken.ass     # Drops bad dialogue lines instead of failing
    ass2srt completions bash > ass2srt.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, defaults
    are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .ass file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for the output file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Skip malformed dialogue lines instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Convert centiseconds to real milliseconds (HH:MM:SS,mmm)
    #[arg(long)]
    rescale_timestamps: bool,

    /// Stop reading dialogue at the next section header after [Events]
    #[arg(long)]
    strict_sections: bool,

    /// Write the SRT to standard output instead of a file
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ass2srt", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    if let Err(e) = run_convert(&cli, &input_path, config) {
        error!("Error during conversion: {:#}", e);
        log::logger().flush();
        std::process::exit(1);
    }

    Ok(())
}

/// Load the config file if present and apply CLI overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        Config::default()
    };

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.force_overwrite {
        config.output.force_overwrite = true;
    }
    if options.skip_malformed {
        config.conversion.malformed_lines = MalformedLinePolicy::Skip;
    }
    if options.rescale_timestamps {
        config.conversion.timestamps = TimestampMode::Rescale;
    }
    if options.strict_sections {
        config.conversion.sections = SectionMode::Strict;
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_convert(options: &CommandLineOptions, input_path: &Path, config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        if options.stdout {
            controller.run_to_stdout(input_path)?;
            return Ok(());
        }

        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| match input_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            });
        controller.run(input_path, &output_dir)?;
    } else if input_path.is_dir() {
        if options.stdout || options.output_dir.is_some() {
            warn!("--stdout and --output-dir are ignored for directories; files are written next to their sources");
        }

        let summary = controller.run_folder(input_path)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to convert", summary.failed));
        }
        info!("Done");
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
