/*!
 * Timing and layout checks for subtitle entries.
 *
 * Single-cue checks (in this order):
 * - Duration below the minimum
 * - Duration above the maximum
 * - Reading speed above the language/audience limit
 * - Each line wider than the language limit
 * - Three or more lines
 *
 * Sequence checks compare each cue with its predecessor in file order and
 * flag overlaps and gaps shorter than the minimum.
 */

use log::debug;

use crate::app_config::Ruleset;
use crate::subtitle_processor::SubtitleEntry;

use super::issues::{ComplianceIssue, Violation};
use super::length::{display_width, reading_speed};

/// Lines allowed per cue
pub const MAX_LINES: usize = 2;

/// Check one cue in isolation; every applicable issue is returned
pub fn validate_entry(entry: &SubtitleEntry, ruleset: &Ruleset) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();
    let timing = &ruleset.timing;
    let duration_ms = entry.duration_ms();

    if duration_ms < timing.min_duration_ms {
        issues.push(ComplianceIssue::DurationTooShort {
            duration_ms,
            min_duration_ms: timing.min_duration_ms,
        });
    }

    if duration_ms > timing.max_duration_ms {
        issues.push(ComplianceIssue::DurationTooLong {
            duration_ms,
            max_duration_ms: timing.max_duration_ms,
        });
    }

    let max_cps = ruleset.cps_limit();
    let cps = reading_speed(&entry.text, duration_ms, &ruleset.language);
    if cps > max_cps {
        issues.push(ComplianceIssue::ReadingSpeedExceeded { cps, max_cps });
    }

    for line in entry.lines() {
        let width = display_width(line, &ruleset.language);
        if width > ruleset.rules.max_chars {
            issues.push(ComplianceIssue::line_too_long(line, width, ruleset.rules.max_chars));
        }
    }

    let line_count = entry.line_count();
    if line_count > MAX_LINES {
        issues.push(ComplianceIssue::TooManyLines { line_count });
    }

    issues
}

/// Gap or overlap issue between a cue and the one before it
pub fn check_gap(previous: &SubtitleEntry, current: &SubtitleEntry, ruleset: &Ruleset) -> Option<ComplianceIssue> {
    let gap_ms = current.start_time_ms - previous.end_time_ms;
    let min_gap_ms = ruleset.timing.min_gap_ms;

    if gap_ms < 0 {
        Some(ComplianceIssue::Overlap { overlap_ms: -gap_ms })
    } else if gap_ms > 0 && gap_ms < min_gap_ms {
        Some(ComplianceIssue::GapTooShort { gap_ms, min_gap_ms })
    } else {
        None
    }
}

/// Validate a whole file
///
/// Two passes are concatenated: first one violation per cue with local
/// issues, then one violation per cue whose gap to its predecessor is an
/// overlap or too short. A cue can therefore appear twice, with its local
/// violation always listed before its gap violation.
pub fn validate_collection(entries: &[SubtitleEntry], ruleset: &Ruleset) -> Vec<Violation> {
    let mut violations: Vec<Violation> = entries
        .iter()
        .filter_map(|entry| Violation::for_entry(entry, validate_entry(entry, ruleset)))
        .collect();
    let local_count = violations.len();

    for pair in entries.windows(2) {
        if let Some(issue) = check_gap(&pair[0], &pair[1], ruleset) {
            violations.extend(Violation::for_entry(&pair[1], vec![issue]));
        }
    }

    debug!(
        "Validation: {} entries, {} with local issues, {} gap/overlap issues",
        entries.len(),
        local_count,
        violations.len() - local_count
    );

    violations
}
