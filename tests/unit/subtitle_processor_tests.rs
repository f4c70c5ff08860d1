/*!
 * Tests for subtitle parsing and serialization
 */

use std::path::PathBuf;
use anyhow::Result;
use netflix_subs::errors::SubtitleError;
use netflix_subs::subtitle_processor::{format_srt, SubtitleCollection, SubtitleEntry};
use crate::common;

/// Test that a compliant file parses into the expected entries
#[test]
fn test_parse_srt_string_withSampleFile_shouldParseAllEntries() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::COMPLIANT_SRT)?;

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].seq_num, 2);
    assert_eq!(entries[1].start_time_ms, 5000);
    assert_eq!(entries[1].end_time_ms, 9000);
    assert_eq!(entries[2].text, "For testing purposes.");
    Ok(())
}

/// Test that serialization reproduces a well-formed file byte for byte
#[test]
fn test_to_srt_string_withParsedFile_shouldRoundTrip() -> Result<()> {
    let collection = SubtitleCollection::from_srt_string(PathBuf::from("sample.srt"), common::COMPLIANT_SRT, Some("en"))?;

    assert_eq!(collection.to_srt_string(), common::COMPLIANT_SRT);
    Ok(())
}

/// Test that blocks separated by several or whitespace-only blank lines are split
#[test]
fn test_parse_srt_string_withExtraBlankLines_shouldSplitBlocks() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nOne\n\n\n  \n2\n00:00:03,000 --> 00:00:04,000\nTwo\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].text, "Two");
    Ok(())
}

/// Test that empty input yields no entries rather than an error
#[test]
fn test_parse_srt_string_withEmptyInput_shouldReturnEmpty() -> Result<()> {
    assert!(SubtitleCollection::parse_srt_string("")?.is_empty());
    assert!(SubtitleCollection::parse_srt_string("\n\n  \n")?.is_empty());
    Ok(())
}

/// Test that hour fields wider than two digits survive a round trip
#[test]
fn test_parse_timestamp_withWideHours_shouldNotWrap() -> Result<()> {
    let ms = SubtitleEntry::parse_timestamp("123:00:00,000")?;

    assert_eq!(ms, 123 * 3_600_000);
    assert_eq!(SubtitleEntry::format_timestamp(ms), "123:00:00,000");
    Ok(())
}

/// Test that an absurd hour field drops its block and keeps the rest of the file
#[test]
fn test_parse_srt_string_withOversizedHourField_shouldDropOnlyThatBlock() -> Result<()> {
    for hours in ["9999999999999", "99999999999999999999"] {
        let content = format!(
            "1\n00:00:01,000 --> 00:00:02,000\nGood\n\n2\n{h}:00:00,000 --> {h}:00:01,000\nHuge\n\n3\n00:00:03,000 --> 00:00:04,000\nAlso good\n",
            h = hours
        );

        let entries = SubtitleCollection::parse_srt_string(&content)?;

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Good", "Also good"]);
    }
    Ok(())
}

/// Test that hour fields beyond five digits are rejected instead of overflowing
#[test]
fn test_parse_timestamp_withOversizedHours_shouldReturnError() {
    let largest = SubtitleEntry::parse_timestamp("99999:59:59,999");
    assert_eq!(largest, Ok(99_999 * 3_600_000 + 3_599_999));

    for bad in ["100000:00:00,000", "9999999999999:00:00,000"] {
        assert_eq!(
            SubtitleEntry::parse_timestamp(bad),
            Err(SubtitleError::MalformedTimecode(bad.to_string()))
        );
    }
}

/// Test that malformed timecodes are reported with their text
#[test]
fn test_parse_timestamp_withMalformedInput_shouldReturnError() {
    for bad in ["", "00:00:01", "00:0:01,000", "00:00:01,00", "aa:bb:cc,ddd"] {
        assert_eq!(
            SubtitleEntry::parse_timestamp(bad),
            Err(SubtitleError::MalformedTimecode(bad.to_string()))
        );
    }
}

/// Test that file order is kept even when timings go backwards
#[test]
fn test_parse_srt_string_withUnsortedCues_shouldKeepFileOrder() -> Result<()> {
    let content = "2\n00:00:05,000 --> 00:00:06,000\nLater\n\n1\n00:00:01,000 --> 00:00:02,000\nEarlier\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries[0].text, "Later");
    assert_eq!(entries[1].text, "Earlier");
    assert!(format_srt(&entries).starts_with("1\n00:00:05,000"));
    Ok(())
}

/// Test the per-entry helpers
#[test]
fn test_subtitle_entry_helpers_shouldReportDurationAndLines() {
    let entry = SubtitleEntry::new(1, 1000, 3500, "First line\nSecond line".to_string());

    assert_eq!(entry.duration_ms(), 2500);
    assert_eq!(entry.line_count(), 2);
    assert_eq!(entry.lines().collect::<Vec<_>>(), vec!["First line", "Second line"]);
    assert_eq!(
        entry.to_string(),
        "1\n00:00:01,000 --> 00:00:03,500\nFirst line\nSecond line\n"
    );
}
