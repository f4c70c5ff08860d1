/*!
 * Clean: repair what can be repaired, drop what cannot.
 *
 * Each cue is repaired and re-validated on its own. Cues that still break a
 * local rule are removed, and gaps are normalized over the survivors only, as
 * if the removed cues had never been in the file.
 */

use log::{debug, info};
use serde::Serialize;

use crate::app_config::Ruleset;
use crate::repair::{repair_entry, repair_gaps, RepairSummary};
use crate::subtitle_processor::SubtitleEntry;
use crate::validation::issues::ComplianceIssue;
use crate::validation::timecodes::validate_entry;

/// A cue discarded by `clean`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedEntry {
    /// Sequence number in the source file
    pub seq_num: usize,
    /// Issues left after repair
    pub issues: Vec<ComplianceIssue>,
}

/// Result of cleaning a cue sequence
#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    pub kept: Vec<SubtitleEntry>,
    pub removed: Vec<RemovedEntry>,
}

pub fn clean(entries: &[SubtitleEntry], ruleset: &Ruleset) -> CleanOutcome {
    let mut summary = RepairSummary::default();
    let mut outcome = CleanOutcome::default();

    for entry in entries {
        let mut repaired = entry.clone();
        repair_entry(&mut repaired, ruleset, &mut summary);

        let issues = validate_entry(&repaired, ruleset);
        if issues.is_empty() {
            outcome.kept.push(repaired);
        } else {
            debug!("Removing cue {}: {} issue(s) remain after repair", entry.seq_num, issues.len());
            outcome.removed.push(RemovedEntry {
                seq_num: entry.seq_num,
                issues,
            });
        }
    }

    summary.gap_fixes = repair_gaps(&mut outcome.kept, &ruleset.timing);

    info!(
        "Cleaned {} cues: kept {}, removed {} ({} timing, {} line break, {} gap fixes)",
        entries.len(),
        outcome.kept.len(),
        outcome.removed.len(),
        summary.timing_fixes,
        summary.line_break_fixes,
        summary.gap_fixes
    );

    outcome
}
