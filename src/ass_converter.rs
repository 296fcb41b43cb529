/*!
 * ASS to SRT conversion.
 *
 * A single pass over the ASS document: detect the `[Events]` section, pick
 * out `Dialogue:` lines, split them into fields, clean up timestamps and
 * text, and collect the results as SRT cues. Output is buffered and written
 * once, so a failed conversion never writes anything.
 */

use std::io::{BufRead, Write};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{ConversionOptions, MalformedLinePolicy, SectionMode, TimestampMode};
use crate::errors::ConversionError;
use crate::subtitle_processor::{AssTimestamp, SrtDocument};

/// Header that opens the events section
pub const EVENTS_HEADER: &str = "[Events]";

/// Prefix of the event lines that become cues
pub const DIALOGUE_PREFIX: &str = "Dialogue:";

/// Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text
pub const DIALOGUE_FIELD_COUNT: usize = 10;

const START_FIELD: usize = 1;
const END_FIELD: usize = 2;
const TEXT_FIELD: usize = 9;

// @const: Inline override tag, shortest match between braces
static OVERRIDE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{.*?\}").unwrap()
});

/// Statistics about a finished conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Total number of input lines read
    pub lines_read: usize,

    /// Whether an `[Events]` header was found
    pub events_section_found: bool,

    /// Number of `Dialogue:` lines inside the events section
    pub dialogue_lines: usize,

    /// Number of cues in the output
    pub cues_emitted: usize,

    /// 1-based line numbers of dialogue lines dropped in skip mode
    pub skipped_lines: Vec<usize>,
}

/// Converts ASS documents to SRT
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConversionOptions,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Convert an ASS stream into an SRT stream
    ///
    /// The output is written with a single write once every input line has
    /// been consumed. Any error leaves the output untouched.
    pub fn convert<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<ConversionReport, ConversionError> {
        let (document, report) = self.parse(input)?;
        document.write_to(&mut output)?;

        debug!(
            "Converted {} dialogue line(s) into {} cue(s)",
            report.dialogue_lines, report.cues_emitted
        );

        Ok(report)
    }

    /// Convert an in-memory ASS document to SRT text
    pub fn convert_str(&self, content: &str) -> Result<String, ConversionError> {
        let (document, _) = self.parse(content.as_bytes())?;
        Ok(document.to_srt_string())
    }

    /// Scan an ASS stream and collect its dialogue lines as cues
    pub fn parse<R: BufRead>(&self, mut input: R) -> Result<(SrtDocument, ConversionReport), ConversionError> {
        let mut document = SrtDocument::new();
        let mut report = ConversionReport::default();
        let mut in_event_section = false;
        let mut raw = Vec::new();

        while let Some(line) = read_line_lossy(&mut input, &mut raw)? {
            let line_number = report.lines_read + 1;
            report.lines_read = line_number;

            if is_events_header(&line) {
                if !in_event_section {
                    debug!("Entering events section at line {}", line_number);
                }
                in_event_section = true;
                report.events_section_found = true;
                continue;
            }

            if in_event_section
                && self.options.sections == SectionMode::Strict
                && is_section_header(&line)
            {
                debug!("Leaving events section at line {}: {}", line_number, line.trim());
                in_event_section = false;
                continue;
            }

            if !in_event_section || !is_dialogue_line(&line) {
                continue;
            }

            report.dialogue_lines += 1;

            match self.convert_dialogue_line(&line, line_number) {
                Ok((start, end, text)) => {
                    let cue = document.push_cue(start, end, text);
                    trace!("Cue {}: {} --> {}", cue.index, cue.start, cue.end);
                }
                Err(e) if e.is_line_error() && self.options.malformed_lines == MalformedLinePolicy::Skip => {
                    warn!("Skipping dialogue line: {}", e);
                    report.skipped_lines.push(line_number);
                }
                Err(e) => {
                    debug!("Aborting conversion at line {}", line_number);
                    return Err(e);
                }
            }
        }

        report.cues_emitted = document.len();
        Ok((document, report))
    }

    /// Extract start, end and text from one dialogue line
    fn convert_dialogue_line(&self, line: &str, line_number: usize) -> Result<(String, String, String), ConversionError> {
        let fields = split_fields(line, DIALOGUE_FIELD_COUNT);
        if fields.len() < DIALOGUE_FIELD_COUNT {
            return Err(ConversionError::MalformedDialogueLine {
                line_number,
                found: fields.len(),
                expected: DIALOGUE_FIELD_COUNT,
            });
        }

        let start = self.convert_timestamp(fields[START_FIELD], line_number)?;
        let end = self.convert_timestamp(fields[END_FIELD], line_number)?;
        let text = sanitize_text(fields[TEXT_FIELD]);

        Ok((start, end, text))
    }

    fn convert_timestamp(&self, raw: &str, line_number: usize) -> Result<String, ConversionError> {
        reformat_timestamp(raw, self.options.timestamps).ok_or_else(|| {
            ConversionError::InvalidTimestamp {
                line_number,
                value: raw.to_string(),
            }
        })
    }
}

/// Read one line, decoding invalid UTF-8 as U+FFFD
///
/// The trailing `\n` or `\r\n` is removed. Returns `None` at end of input.
pub fn read_line_lossy<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Whether the line opens the events section (substring match, case-sensitive)
pub fn is_events_header(line: &str) -> bool {
    line.contains(EVENTS_HEADER)
}

/// Whether the line is a bracketed section header such as `[V4+ Styles]`
pub fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Whether the line is a dialogue event
pub fn is_dialogue_line(line: &str) -> bool {
    line.starts_with(DIALOGUE_PREFIX)
}

/// Split on commas into at most `max_fields` fields
///
/// The last field keeps every remaining comma, so free text at the end of a
/// record survives intact.
pub fn split_fields(line: &str, max_fields: usize) -> Vec<&str> {
    line.splitn(max_fields, ',').collect()
}

/// Convert an ASS timestamp to its SRT form
///
/// `Verbatim` swaps every `.` for `,` and never fails. `Rescale` parses the
/// centisecond value and returns `None` when the token is not a timestamp.
pub fn reformat_timestamp(raw: &str, mode: TimestampMode) -> Option<String> {
    match mode {
        TimestampMode::Verbatim => Some(raw.replace('.', ",")),
        TimestampMode::Rescale => AssTimestamp::parse_to_ms(raw)
            .ok()
            .map(AssTimestamp::format_srt),
    }
}

/// Strip override tags, expand `\N` and trim the result
pub fn sanitize_text(raw: &str) -> String {
    let stripped = OVERRIDE_TAG_REGEX.replace_all(raw, "");
    stripped.replace("\\N", "\n").trim().to_string()
}
