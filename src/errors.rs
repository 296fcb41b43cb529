/*!
 * Error types for the ass2srt application.
 *
 * The conversion core reports failures through `ConversionError`; the
 * application layer wraps them in `anyhow` with context.
 */

use thiserror::Error;

/// Errors that can occur while converting an ASS document to SRT
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input could not be read or the output could not be written
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A `Dialogue:` line did not carry enough comma-separated fields
    #[error("Malformed dialogue line {line_number}: found {found} fields, expected {expected}")]
    MalformedDialogueLine {
        /// 1-based line number in the source document
        line_number: usize,
        /// Number of fields the line split into
        found: usize,
        /// Number of fields a dialogue line must have
        expected: usize,
    },

    /// A timestamp could not be parsed (only raised when rescaling timestamps)
    #[error("Invalid timestamp on line {line_number}: '{value}'")]
    InvalidTimestamp {
        /// 1-based line number in the source document
        line_number: usize,
        /// The raw timestamp token
        value: String,
    },
}

impl ConversionError {
    /// Whether this error describes a single bad dialogue line rather than an I/O failure
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedDialogueLine { .. } | Self::InvalidTimestamp { .. }
        )
    }
}
