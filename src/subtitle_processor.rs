use std::fmt;
use std::path::PathBuf;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::language_utils;

// @module: SubRip parsing, serialization and the timecode codec

// @const: SRT timing line, anchored at the start of the line
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,5}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2,5}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: A single HH:MM:SS,mmm timecode; hours take 2 to 5 digits so the
// millisecond value stays far from i64 overflow
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,5}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

// @const: One or more blank (or whitespace-only) lines between blocks
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:[ \t]*\n)+").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number as read from the file
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: i64,

    // @field: End time in ms, not guaranteed to be after the start
    pub end_time_ms: i64,

    // @field: Subtitle text, lines separated by '\n'
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: i64, end_time_ms: i64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<i64, SubtitleError> {
        let malformed = || SubtitleError::MalformedTimecode(timestamp.to_string());
        let caps = TIMECODE_REGEX.captures(timestamp.trim()).ok_or_else(malformed)?;

        let field = |idx: usize| -> Result<i64, SubtitleError> {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .ok_or_else(malformed)
        };

        Ok(field(1)? * 3_600_000 + field(2)? * 60_000 + field(3)? * 1_000 + field(4)?)
    }

    /// Format milliseconds as an SRT timestamp; negative values clamp to zero
    pub fn format_timestamp(ms: i64) -> String {
        let ms = ms.max(0);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Display duration; zero or negative for inverted timings
    pub fn duration_ms(&self) -> i64 {
        self.end_time_ms - self.start_time_ms
    }

    /// Text lines in display order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Write this entry as an SRT block with the given index
    fn write_block(&self, f: &mut impl fmt::Write, index: usize) -> fmt::Result {
        writeln!(f, "{}", index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_block(f, self.seq_num)
    }
}

/// Serialize entries to SRT, renumbering them from 1
pub fn format_srt(entries: &[SubtitleEntry]) -> String {
    let mut output = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        // Writing into a String cannot fail
        let _ = entry.write_block(&mut output, i + 1);
    }
    output
}

/// Parse one block; `None` means the block is malformed and dropped
fn parse_block(block: &str) -> Option<SubtitleEntry> {
    let lines: Vec<&str> = block.trim().split('\n').collect();

    let reject = |reason: &str| {
        let error = SubtitleError::MalformedBlock {
            first_line: lines.first().copied().unwrap_or_default().to_string(),
            reason: reason.to_string(),
        };
        debug!("Dropping block: {}", error);
        None
    };

    if lines.len() < 3 {
        return reject("fewer than 3 lines");
    }

    let Some(caps) = TIMING_LINE_REGEX.captures(lines[1].trim()) else {
        return reject("timing line does not match HH:MM:SS,mmm --> HH:MM:SS,mmm");
    };

    let Ok(seq_num) = lines[0].trim().parse::<usize>() else {
        return reject("index is not an integer");
    };

    let (Ok(start_time_ms), Ok(end_time_ms)) = (
        SubtitleEntry::parse_timestamp(&caps[1]),
        SubtitleEntry::parse_timestamp(&caps[2]),
    ) else {
        return reject("timecode out of range");
    };

    Some(SubtitleEntry::new(seq_num, start_time_ms, end_time_ms, lines[2..].join("\n")))
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename, `-` for standard input
    pub source_file: PathBuf,

    /// List of subtitle entries in file order
    pub entries: Vec<SubtitleEntry>,

    /// Resolved language code
    pub source_language: String,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf, source_language: String) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            source_language,
        }
    }

    /// Parse SRT content, resolving the language explicitly or by detection
    pub fn from_srt_string(source_file: PathBuf, content: &str, language: Option<&str>) -> Result<Self, SubtitleError> {
        let entries = Self::parse_srt_string(content)?;

        let source_language = match language {
            Some(code) => language_utils::normalize_language_code(code),
            None => language_utils::detect_language(&entries),
        };

        Ok(SubtitleCollection {
            source_file,
            entries,
            source_language,
        })
    }

    /// Parse SRT format string into subtitle entries
    ///
    /// Blocks are separated by blank lines. A block needs an integer index,
    /// a timing line and at least one text line; anything else is dropped.
    /// Entries keep file order and their original sequence numbers.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let normalized = content
            .trim_start_matches('\u{feff}')
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            warn!("No subtitle content to parse");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dropped = 0usize;

        for block in BLOCK_SEPARATOR_REGEX.split(trimmed) {
            match parse_block(block) {
                Some(entry) => entries.push(entry),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("Dropped {} malformed subtitle block(s)", dropped);
        }
        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
        }

        Ok(entries)
    }

    /// Serialize to SRT, renumbering from 1
    pub fn to_srt_string(&self) -> String {
        format_srt(&self.entries)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Language: {}", self.source_language)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
