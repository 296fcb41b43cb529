use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Conversion behavior
    #[serde(default)]
    pub conversion: ConversionOptions,

    /// Output file naming and overwrite settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to do with a `Dialogue:` line that cannot be converted
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    // @policy: Fail the whole conversion on the first bad line
    #[default]
    Abort,
    // @policy: Drop the bad line, log it and keep going
    Skip,
}

/// How ASS timestamps are carried into the SRT output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    // @mode: Only swap the decimal separator, digits are copied as-is
    #[default]
    Verbatim,
    // @mode: Parse centiseconds and emit HH:MM:SS,mmm
    Rescale,
}

/// How the `[Events]` section is tracked while scanning
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SectionMode {
    // @mode: Once `[Events]` is seen, every later line is in the events section
    #[default]
    Sticky,
    // @mode: Any later `[...]` header leaves the events section
    Strict,
}

/// Options that drive a single conversion
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionOptions {
    /// Handling of malformed dialogue lines
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,

    /// Timestamp conversion mode
    #[serde(default)]
    pub timestamps: TimestampMode,

    /// Events section tracking mode
    #[serde(default)]
    pub sections: SectionMode,
}

/// Output naming configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Substring of the source name that gets replaced
    #[serde(default = "default_extension_from")]
    pub extension_from: String,

    /// Replacement substring for the destination name
    #[serde(default = "default_extension_to")]
    pub extension_to: String,

    /// Whether existing destination files may be overwritten
    #[serde(default)]
    pub force_overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension_from: default_extension_from(),
            extension_to: default_extension_to(),
            force_overwrite: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_extension_from() -> String {
    ".ass".to_string()
}

fn default_extension_to() -> String {
    ".srt".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("extension_from", &self.output.extension_from),
            ("extension_to", &self.output.extension_to),
        ] {
            if value.is_empty() {
                return Err(anyhow!("Output setting '{}' must not be empty", name));
            }
            if !value.starts_with('.') {
                return Err(anyhow!(
                    "Output setting '{}' must start with '.', got '{}'",
                    name,
                    value
                ));
            }
        }

        if self.output.extension_from == self.output.extension_to {
            return Err(anyhow!(
                "Source and destination extensions are identical: '{}'",
                self.output.extension_from
            ));
        }

        Ok(())
    }
}
