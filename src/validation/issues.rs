/*!
 * Structured compliance issues.
 *
 * Every issue carries its category from the moment it is produced, so report
 * summaries never have to re-derive categories from message text.
 */

use serde::Serialize;

use crate::subtitle_processor::SubtitleEntry;

/// Number of characters of an offending line quoted in messages
const LINE_PREFIX_CHARS: usize = 20;

/// Issue categories used for report summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DurationTooShort,
    DurationTooLong,
    ReadingSpeedExceeded,
    LineTooLong,
    TooManyLines,
    GapTooShort,
    Overlap,
}

impl IssueKind {
    /// Every kind, in summary display order
    pub const ALL: [IssueKind; 7] = [
        IssueKind::DurationTooShort,
        IssueKind::DurationTooLong,
        IssueKind::ReadingSpeedExceeded,
        IssueKind::LineTooLong,
        IssueKind::GapTooShort,
        IssueKind::Overlap,
        IssueKind::TooManyLines,
    ];

    /// Human-readable label for summaries
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::DurationTooShort => "Duration too short",
            IssueKind::DurationTooLong => "Duration too long",
            IssueKind::ReadingSpeedExceeded => "Reading speed (CPS)",
            IssueKind::LineTooLong => "Line too long",
            IssueKind::TooManyLines => "Too many lines",
            IssueKind::GapTooShort => "Gap too short",
            IssueKind::Overlap => "Overlap",
        }
    }
}

/// A single rule violation found on a cue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "IssueRecord")]
pub enum ComplianceIssue {
    DurationTooShort {
        duration_ms: i64,
        min_duration_ms: i64,
    },
    DurationTooLong {
        duration_ms: i64,
        max_duration_ms: i64,
    },
    ReadingSpeedExceeded {
        cps: f64,
        max_cps: f64,
    },
    LineTooLong {
        line_prefix: String,
        width: usize,
        max_chars: usize,
    },
    TooManyLines {
        line_count: usize,
    },
    GapTooShort {
        gap_ms: i64,
        min_gap_ms: i64,
    },
    Overlap {
        overlap_ms: i64,
    },
}

impl ComplianceIssue {
    /// Build a line-length issue quoting the start of the raw line
    pub fn line_too_long(line: &str, width: usize, max_chars: usize) -> Self {
        ComplianceIssue::LineTooLong {
            line_prefix: line.chars().take(LINE_PREFIX_CHARS).collect(),
            width,
            max_chars,
        }
    }

    pub fn kind(&self) -> IssueKind {
        match self {
            ComplianceIssue::DurationTooShort { .. } => IssueKind::DurationTooShort,
            ComplianceIssue::DurationTooLong { .. } => IssueKind::DurationTooLong,
            ComplianceIssue::ReadingSpeedExceeded { .. } => IssueKind::ReadingSpeedExceeded,
            ComplianceIssue::LineTooLong { .. } => IssueKind::LineTooLong,
            ComplianceIssue::TooManyLines { .. } => IssueKind::TooManyLines,
            ComplianceIssue::GapTooShort { .. } => IssueKind::GapTooShort,
            ComplianceIssue::Overlap { .. } => IssueKind::Overlap,
        }
    }
}

impl std::fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceIssue::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(f, "Duration {}ms < {}ms minimum", duration_ms, min_duration_ms)
            }
            ComplianceIssue::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(f, "Duration {}ms > {}ms maximum", duration_ms, max_duration_ms)
            }
            ComplianceIssue::ReadingSpeedExceeded { cps, max_cps } => {
                write!(f, "CPS {:.1} > {} maximum", cps, max_cps)
            }
            ComplianceIssue::LineTooLong { line_prefix, width, max_chars } => {
                write!(f, "Line '{}...' has {} chars > {} max", line_prefix, width, max_chars)
            }
            ComplianceIssue::TooManyLines { line_count } => {
                write!(f, "Has {} lines, max is 2", line_count)
            }
            ComplianceIssue::GapTooShort { gap_ms, min_gap_ms } => {
                write!(f, "Gap {}ms < {}ms minimum", gap_ms, min_gap_ms)
            }
            ComplianceIssue::Overlap { overlap_ms } => {
                write!(f, "Overlaps previous cue by {}ms", overlap_ms)
            }
        }
    }
}

/// Serialized form of an issue
#[derive(Debug, Clone, Serialize)]
pub struct IssueRecord {
    pub kind: IssueKind,
    pub message: String,
}

impl From<ComplianceIssue> for IssueRecord {
    fn from(issue: ComplianceIssue) -> Self {
        Self {
            kind: issue.kind(),
            message: issue.to_string(),
        }
    }
}

/// A flagged cue with its ordered, non-empty list of issues
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ViolationRecord")]
pub struct Violation {
    /// Sequence number of the offending cue
    pub seq_num: usize,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub issues: Vec<ComplianceIssue>,
}

impl Violation {
    /// Wrap issues found on `entry`; `None` when there is nothing to report
    pub fn for_entry(entry: &SubtitleEntry, issues: Vec<ComplianceIssue>) -> Option<Self> {
        if issues.is_empty() {
            return None;
        }

        Some(Self {
            seq_num: entry.seq_num,
            start_time_ms: entry.start_time_ms,
            end_time_ms: entry.end_time_ms,
            issues,
        })
    }

    pub fn format_start_time(&self) -> String {
        SubtitleEntry::format_timestamp(self.start_time_ms)
    }

    pub fn format_end_time(&self) -> String {
        SubtitleEntry::format_timestamp(self.end_time_ms)
    }
}

/// Serialized form of a violation, with SRT timecodes
#[derive(Debug, Clone, Serialize)]
pub struct ViolationRecord {
    pub index: usize,
    pub start: String,
    pub end: String,
    pub issues: Vec<IssueRecord>,
}

impl From<Violation> for ViolationRecord {
    fn from(violation: Violation) -> Self {
        Self {
            index: violation.seq_num,
            start: violation.format_start_time(),
            end: violation.format_end_time(),
            issues: violation.issues.into_iter().map(IssueRecord::from).collect(),
        }
    }
}
