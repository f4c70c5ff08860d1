/*!
 * Validation service that runs the compliance checks for one file.
 *
 * This module binds a `Ruleset` to the single-cue and sequence validators
 * and builds the serializable report consumed by the CLI.
 */

use log::debug;
use serde::Serialize;

use crate::app_config::Ruleset;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};

use super::issues::{ComplianceIssue, IssueKind, Violation};
use super::timecodes;

/// Issue counts per category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueSummary {
    pub duration_too_short: usize,
    pub duration_too_long: usize,
    pub reading_speed_exceeded: usize,
    pub line_too_long: usize,
    pub too_many_lines: usize,
    pub gap_too_short: usize,
    pub overlap: usize,
}

impl IssueSummary {
    /// Count every issue of every violation
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut summary = Self::default();
        for issue in violations.iter().flat_map(|v| v.issues.iter()) {
            *summary.slot(issue.kind()) += 1;
        }
        summary
    }

    fn slot(&mut self, kind: IssueKind) -> &mut usize {
        match kind {
            IssueKind::DurationTooShort => &mut self.duration_too_short,
            IssueKind::DurationTooLong => &mut self.duration_too_long,
            IssueKind::ReadingSpeedExceeded => &mut self.reading_speed_exceeded,
            IssueKind::LineTooLong => &mut self.line_too_long,
            IssueKind::TooManyLines => &mut self.too_many_lines,
            IssueKind::GapTooShort => &mut self.gap_too_short,
            IssueKind::Overlap => &mut self.overlap,
        }
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        match kind {
            IssueKind::DurationTooShort => self.duration_too_short,
            IssueKind::DurationTooLong => self.duration_too_long,
            IssueKind::ReadingSpeedExceeded => self.reading_speed_exceeded,
            IssueKind::LineTooLong => self.line_too_long,
            IssueKind::TooManyLines => self.too_many_lines,
            IssueKind::GapTooShort => self.gap_too_short,
            IssueKind::Overlap => self.overlap,
        }
    }

    pub fn total(&self) -> usize {
        IssueKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }
}

/// Full validation result for one file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Source identifier (path or `-`)
    pub source: String,
    /// Resolved language code
    pub language: String,
    /// Display name of the rules applied
    pub language_name: String,
    pub kids_mode: bool,
    pub total_entries: usize,
    pub violations: Vec<Violation>,
    pub summary: IssueSummary,
}

impl ValidationReport {
    /// Whether the file meets every rule
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Runs validations for a fixed ruleset
pub struct ValidationService {
    ruleset: Ruleset,
}

impl ValidationService {
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Local issues of a single cue
    pub fn validate_entry(&self, entry: &SubtitleEntry) -> Vec<ComplianceIssue> {
        timecodes::validate_entry(entry, &self.ruleset)
    }

    /// Local and gap/overlap violations of a cue sequence
    pub fn validate_entries(&self, entries: &[SubtitleEntry]) -> Vec<Violation> {
        timecodes::validate_collection(entries, &self.ruleset)
    }

    /// Validate a collection and build its report
    pub fn validate_collection(&self, collection: &SubtitleCollection) -> ValidationReport {
        let violations = self.validate_entries(&collection.entries);
        let summary = IssueSummary::from_violations(&violations);

        debug!(
            "Report for {}: {} violations, {} issues",
            collection.source_file.display(),
            violations.len(),
            summary.total()
        );

        ValidationReport {
            source: collection.source_file.display().to_string(),
            language: self.ruleset.language.clone(),
            language_name: self.ruleset.rules.name.to_string(),
            kids_mode: self.ruleset.kids_mode,
            total_entries: collection.entries.len(),
            violations,
            summary,
        }
    }
}
