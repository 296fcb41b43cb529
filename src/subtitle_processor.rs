use std::fmt;
use std::io::Write;
use anyhow::{Result, Context, anyhow};

// @module: SRT cue model and serialization

// @struct: Single SRT cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    // @field: 1-based sequence number
    pub index: usize,

    // @field: Start timestamp, already in output form
    pub start: String,

    // @field: End timestamp, already in output form
    pub end: String,

    // @field: Cue text, may span several lines
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new cue
    pub fn new(index: usize, start: String, end: String, text: String) -> Self {
        SubtitleCue {
            index,
            start,
            end,
            text,
        }
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{} --> {}\n{}\n\n", self.index, self.start, self.end, self.text)
    }
}

/// Ordered list of cues with dense indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrtDocument {
    /// Cues in source order
    pub cues: Vec<SubtitleCue>,
}

impl SrtDocument {
    /// Create an empty document
    pub fn new() -> Self {
        SrtDocument { cues: Vec::new() }
    }

    /// Append a cue, assigning the next index
    pub fn push_cue(&mut self, start: String, end: String, text: String) -> &SubtitleCue {
        let index = self.cues.len() + 1;
        self.cues.push(SubtitleCue::new(index, start, end, text));
        &self.cues[index - 1]
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubtitleCue> {
        self.cues.iter()
    }

    /// Serialize the whole document to SRT text
    pub fn to_srt_string(&self) -> String {
        self.to_string()
    }

    /// Write the serialized document in a single write
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let content = self.to_srt_string();
        writer.write_all(content.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Display for SrtDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cue in &self.cues {
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

/// Timestamp arithmetic used when ASS times are rescaled to real milliseconds
pub struct AssTimestamp;

impl AssTimestamp {
    /// Parse an ASS `H:MM:SS.cc` timestamp to milliseconds
    ///
    /// The fractional part may carry one to three digits and is read as a
    /// decimal fraction of a second, so `.5`, `.50` and `.500` all mean 500 ms.
    pub fn parse_to_ms(timestamp: &str) -> Result<u64> {
        let timestamp = timestamp.trim();
        let (clock, fraction) = timestamp
            .split_once('.')
            .ok_or_else(|| anyhow!("Missing fractional seconds in timestamp: {}", timestamp))?;

        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;

        if fraction.is_empty() || fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(anyhow!("Invalid fractional seconds in timestamp: {}", timestamp));
        }
        let millis: u64 = format!("{:0<3}", fraction).parse().context("Failed to parse fraction")?;

        if minutes >= 60 || seconds >= 60 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(|| anyhow!("Timestamp out of range: {}", timestamp))
    }

    /// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_srt(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}
