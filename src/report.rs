/*!
 * Rendering of validation reports as text or JSON.
 */

use anyhow::{Context, Result};
use std::fmt;

use crate::app_config::{rules_for, OutputFormat, MAX_DURATION_MS, MIN_DURATION_MS, MIN_GAP_MS};
use crate::validation::issues::IssueKind;
use crate::validation::service::ValidationReport;

/// Violations listed by the full report
const REPORT_DETAIL_LIMIT: usize = 10;

/// Violations listed by the short `validate` output
const SUMMARY_DETAIL_LIMIT: usize = 5;

const RULE: &str = "==================================================";

/// Full report, as printed by the `report` command
pub struct TextReport<'a>(pub &'a ValidationReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let report = self.0;
        let rules = rules_for(&report.language);

        writeln!(f, "\n{}", RULE)?;
        writeln!(f, "Netflix Subtitle Validation Report")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "File: {}", report.source)?;
        writeln!(
            f,
            "Language: {} ({} CPS max{}, {} chars/line)",
            report.language_name,
            rules.cps_limit(report.kids_mode),
            if report.kids_mode { ", kids" } else { "" },
            rules.max_chars
        )?;
        writeln!(
            f,
            "Timing: {}ms-{}ms duration, {}ms gap",
            MIN_DURATION_MS, MAX_DURATION_MS, MIN_GAP_MS
        )?;
        writeln!(f, "\nSummary:")?;
        writeln!(f, "  Total entries: {}", report.total_entries)?;
        writeln!(f, "  Issues found: {}", report.violations.len())?;

        if report.passed() {
            writeln!(f, "\n✓ All entries pass Netflix specifications!")?;
        } else {
            writeln!(f, "\nIssue breakdown:")?;
            for kind in IssueKind::ALL {
                let count = report.summary.count(kind);
                if count > 0 {
                    writeln!(f, "  {}: {}", kind.label(), count)?;
                }
            }

            writeln!(f, "\nDetails (first {}):", REPORT_DETAIL_LIMIT)?;
            for violation in report.violations.iter().take(REPORT_DETAIL_LIMIT) {
                writeln!(
                    f,
                    "  #{} [{} --> {}]",
                    violation.seq_num,
                    violation.format_start_time(),
                    violation.format_end_time()
                )?;
                for issue in &violation.issues {
                    writeln!(f, "    - {}", issue)?;
                }
            }
        }

        writeln!(f, "{}", RULE)
    }
}

/// Short pass/fail output of the `validate` command
pub struct SummaryReport<'a>(pub &'a ValidationReport);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let report = self.0;
        if report.passed() {
            return writeln!(f, "✓ All {} entries pass Netflix specs", report.total_entries);
        }

        writeln!(f, "Found {} entries with issues", report.violations.len())?;
        for violation in report.violations.iter().take(SUMMARY_DETAIL_LIMIT) {
            let messages: Vec<String> = violation.issues.iter().map(|i| i.to_string()).collect();
            writeln!(f, "  #{}: {}", violation.seq_num, messages.join(", "))?;
        }
        Ok(())
    }
}

pub fn render_text(report: &ValidationReport) -> String {
    TextReport(report).to_string()
}

pub fn render_summary(report: &ValidationReport) -> String {
    SummaryReport(report).to_string()
}

/// Machine-readable report
pub fn render_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize validation report")
}

/// Render in the requested format; `full` selects the long text form
pub fn render(report: &ValidationReport, format: OutputFormat, full: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report).map(|json| json + "\n"),
        OutputFormat::Text if full => Ok(render_text(report)),
        OutputFormat::Text => Ok(render_summary(report)),
    }
}
