/*!
 * Tests for the SRT cue model
 */

use std::fmt::Write;
use ass2srt::subtitle_processor::{AssTimestamp, SrtDocument, SubtitleCue};

/// Test cue display formatting
#[test]
fn test_subtitle_cue_display_withValidCue_shouldFormatSrtBlock() {
    let cue = SubtitleCue::new(7, "0:00:05,00".to_string(), "0:00:10,00".to_string(), "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", cue).unwrap();

    assert_eq!(output, "7\n0:00:05,00 --> 0:00:10,00\nTest subtitle\n\n");
}

/// Test that multi-line text is written as-is
#[test]
fn test_subtitle_cue_display_withMultilineText_shouldKeepLineBreaks() {
    let cue = SubtitleCue::new(1, "a".to_string(), "b".to_string(), "Hello\nWorld".to_string());
    assert_eq!(cue.to_string(), "1\na --> b\nHello\nWorld\n\n");
}

/// Test document serialization order and indices
#[test]
fn test_srt_document_withSeveralCues_shouldSerializeInOrder() {
    let mut document = SrtDocument::new();
    assert!(document.is_empty());

    document.push_cue("0:00:01,00".into(), "0:00:02,00".into(), "First".into());
    document.push_cue("0:00:03,00".into(), "0:00:04,00".into(), "Second".into());
    document.push_cue("0:00:05,00".into(), "0:00:06,00".into(), "Third".into());

    assert_eq!(document.len(), 3);
    let indices: Vec<usize> = document.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    assert_eq!(
        document.to_srt_string(),
        "1\n0:00:01,00 --> 0:00:02,00\nFirst\n\n\
2\n0:00:03,00 --> 0:00:04,00\nSecond\n\n\
3\n0:00:05,00 --> 0:00:06,00\nThird\n\n"
    );
}

/// Test that an empty document serializes to nothing
#[test]
fn test_srt_document_withNoCues_shouldSerializeEmpty() {
    let document = SrtDocument::new();
    assert_eq!(document.to_srt_string(), "");

    let mut sink = Vec::new();
    document.write_to(&mut sink).unwrap();
    assert!(sink.is_empty());
}

/// Test writing into any writer
#[test]
fn test_srt_document_writeTo_withBuffer_shouldWriteWholeDocument() {
    let mut document = SrtDocument::new();
    document.push_cue("s".into(), "e".into(), "text".into());

    let mut sink = Vec::new();
    document.write_to(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "1\ns --> e\ntext\n\n");
}

/// Test ASS timestamp parsing
#[test]
fn test_ass_timestamp_parse_withValidTimestamps_shouldReturnMilliseconds() {
    assert_eq!(AssTimestamp::parse_to_ms("0:00:00.00").unwrap(), 0);
    assert_eq!(AssTimestamp::parse_to_ms("0:00:01.50").unwrap(), 1_500);
    assert_eq!(AssTimestamp::parse_to_ms("1:23:45.67").unwrap(), 5_025_670);
    assert_eq!(AssTimestamp::parse_to_ms("10:00:00.01").unwrap(), 36_000_010);
}

/// Test ASS timestamp parsing failures
#[test]
fn test_ass_timestamp_parse_withInvalidTimestamps_shouldFail() {
    assert!(AssTimestamp::parse_to_ms("").is_err());
    assert!(AssTimestamp::parse_to_ms("0:00:01").is_err());
    assert!(AssTimestamp::parse_to_ms("0:00:01,50").is_err());
    assert!(AssTimestamp::parse_to_ms("0:61:00.00").is_err());
    assert!(AssTimestamp::parse_to_ms("0:00:60.00").is_err());
    assert!(AssTimestamp::parse_to_ms("a:bb:cc.dd").is_err());
}

/// Test SRT timestamp formatting
#[test]
fn test_ass_timestamp_format_withMilliseconds_shouldPadFields() {
    assert_eq!(AssTimestamp::format_srt(0), "00:00:00,000");
    assert_eq!(AssTimestamp::format_srt(5_025_670), "01:23:45,670");
    assert_eq!(AssTimestamp::format_srt(36_000_010), "10:00:00,010");
}
