use anyhow::{Result, Context, anyhow};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Suggested destination name for a source document
    // @params: file_name, from, to
    //
    // Every occurrence of `from` is replaced, not only a trailing one, so
    // "show.ass.ass" becomes "show.srt.srt". Names without `from` get `to`
    // appended instead of being returned unchanged.
    pub fn derive_output_filename(file_name: &str, from: &str, to: &str) -> String {
        if !from.is_empty() && file_name.contains(from) {
            file_name.replace(from, to)
        } else {
            format!("{}{}", file_name, to)
        }
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Display name of a path, falling back to the whole path
    pub fn file_name_of<P: AsRef<Path>>(path: P) -> String {
        let path = path.as_ref();
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}

/// Supplies the ASS document to convert
pub trait DocumentSource {
    /// Name used to derive the destination name
    fn display_name(&self) -> String;

    /// Open the document for line-by-line reading
    fn open(&self) -> Result<Box<dyn BufRead>>;
}

/// Creates the document the SRT output is written to
pub trait DocumentSink {
    /// Create a writable document under the suggested name
    ///
    /// Returns the writer and a description of where it points.
    fn create(&self, suggested_name: &str) -> Result<(Box<dyn Write>, PathBuf)>;
}

/// Source document backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn display_name(&self) -> String {
        FileManager::file_name_of(&self.path)
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open subtitle file: {}", self.path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Sink that creates files inside a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    force_overwrite: bool,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(dir: P, force_overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            force_overwrite,
        }
    }

    /// Path a document with this name would be created at
    pub fn target_path(&self, suggested_name: &str) -> PathBuf {
        self.dir.join(suggested_name)
    }
}

impl DocumentSink for DirectorySink {
    fn create(&self, suggested_name: &str) -> Result<(Box<dyn Write>, PathBuf)> {
        FileManager::ensure_dir(&self.dir)?;
        let path = self.target_path(suggested_name);

        let mut options = OpenOptions::new();
        options.write(true);
        if self.force_overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options.open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                anyhow!("Output file already exists: {} (use -f to force overwrite)", path.display())
            } else {
                anyhow!("Failed to create subtitle file {}: {}", path.display(), e)
            }
        })?;

        Ok((Box::new(BufWriter::new(file)), path))
    }
}

/// Sink that writes to standard output
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl DocumentSink for StdoutSink {
    fn create(&self, _suggested_name: &str) -> Result<(Box<dyn Write>, PathBuf)> {
        Ok((Box::new(std::io::stdout()), PathBuf::from("-")))
    }
}
