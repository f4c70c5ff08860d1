/*!
 * Auto-repair heuristics for style guide violations.
 *
 * - Timing: extend cues shorter than the minimum duration
 * - Line breaks: split over-long lines once, keep at most two lines
 * - Gaps: pull the earlier cue's end back to restore the minimum gap
 *
 * Repairs are best effort. Callers must re-validate the result; reading
 * speed in particular cannot be fixed without changing the text.
 */

use log::{debug, info};

use crate::app_config::{Ruleset, TimingRules};
use crate::language_utils;
use crate::subtitle_processor::SubtitleEntry;
use crate::validation::length::{char_width, display_width};
use crate::validation::timecodes::MAX_LINES;

/// Break opportunities for CJK text, kept on the left of the split
const CJK_PUNCTUATION: [char; 16] = [
    '，', '。', '、', '！', '？', '；', '：', '…', '」', '』', '）', '】', '》', '”', '’', '\u{3000}',
];

/// Counts of cues changed by each repair step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RepairSummary {
    pub timing_fixes: usize,
    pub line_break_fixes: usize,
    pub gap_fixes: usize,
}

/// Whether `chars[i]` opens a markup tag (`<` ... `>` with a non-empty body)
fn opens_tag(chars: &[char], i: usize) -> bool {
    chars[i] == '<'
        && chars[i + 1..]
            .iter()
            .position(|&c| c == '>')
            .is_some_and(|offset| offset > 0)
}

/// Split a CJK line after the rightmost punctuation that still fits, else at the middle
fn split_cjk_line(line: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut width = 0;
    let mut in_tag = false;
    let mut split_at = None;

    for (i, &c) in chars.iter().enumerate() {
        if in_tag {
            in_tag = c != '>';
            continue;
        }
        if opens_tag(&chars, i) {
            in_tag = true;
            continue;
        }

        width += char_width(c, true);
        if width > max_chars {
            break;
        }
        if CJK_PUNCTUATION.contains(&c) {
            split_at = Some(i + 1);
        }
    }

    let split_at = split_at.unwrap_or(chars.len() / 2);
    let left: String = chars[..split_at].iter().collect();
    let right: String = chars[split_at..].iter().collect();

    [left, right]
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Split a line into two halves by word count
fn split_at_word_midpoint(line: &str) -> Vec<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return vec![line.to_string()];
    }

    let mid = words.len() / 2;
    vec![words[..mid].join(" "), words[mid..].join(" ")]
}

/// Rebreak every line wider than `max_chars`, then keep the first two lines
///
/// Each long line is split once; the halves are not re-checked.
pub fn repair_line_breaks(text: &str, language: &str, max_chars: usize) -> String {
    let cjk = language_utils::is_cjk(language);
    let mut lines: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if display_width(line, language) <= max_chars {
            lines.push(line.to_string());
        } else if cjk {
            lines.extend(split_cjk_line(line, max_chars));
        } else {
            lines.extend(split_at_word_midpoint(line));
        }
    }

    lines.truncate(MAX_LINES);
    lines.join("\n")
}

/// Extend a cue to the minimum duration; returns whether it changed
pub fn repair_timing(entry: &mut SubtitleEntry, timing: &TimingRules) -> bool {
    if entry.duration_ms() < timing.min_duration_ms {
        entry.end_time_ms = entry.start_time_ms + timing.min_duration_ms;
        true
    } else {
        false
    }
}

/// One forward pass restoring the minimum gap between neighbours
///
/// Overlaps and short gaps are fixed by moving the earlier cue's end to
/// `next.start - min_gap`, unless that would leave the earlier cue shorter
/// than the minimum duration. Returns the number of cues shortened.
pub fn repair_gaps(entries: &mut [SubtitleEntry], timing: &TimingRules) -> usize {
    let mut fixed = 0;

    for i in 1..entries.len() {
        let gap_ms = entries[i].start_time_ms - entries[i - 1].end_time_ms;
        if gap_ms >= timing.min_gap_ms || gap_ms == 0 {
            continue;
        }

        let new_end = if gap_ms < 0 {
            entries[i].start_time_ms - timing.min_gap_ms
        } else {
            entries[i - 1].end_time_ms - (timing.min_gap_ms - gap_ms)
        };

        let previous = &mut entries[i - 1];
        if new_end - previous.start_time_ms >= timing.min_duration_ms {
            previous.end_time_ms = new_end;
            fixed += 1;
        } else {
            debug!(
                "Gap of {}ms after cue {} left as is: shortening would drop it below {}ms",
                gap_ms, previous.seq_num, timing.min_duration_ms
            );
        }
    }

    fixed
}

/// Repair timing and line breaks of one cue in place
pub(crate) fn repair_entry(entry: &mut SubtitleEntry, ruleset: &Ruleset, summary: &mut RepairSummary) {
    if repair_timing(entry, &ruleset.timing) {
        summary.timing_fixes += 1;
    }

    let rebroken = repair_line_breaks(&entry.text, &ruleset.language, ruleset.rules.max_chars);
    if rebroken != entry.text {
        entry.text = rebroken;
        summary.line_break_fixes += 1;
    }
}

/// Repair a copy of the cues: per-cue timing and line breaks, then one gap pass
pub fn repair_all(entries: &[SubtitleEntry], ruleset: &Ruleset) -> Vec<SubtitleEntry> {
    let mut summary = RepairSummary::default();
    let mut repaired = entries.to_vec();

    for entry in repaired.iter_mut() {
        repair_entry(entry, ruleset, &mut summary);
    }
    summary.gap_fixes = repair_gaps(&mut repaired, &ruleset.timing);

    info!(
        "Repaired {} cues: {} timing, {} line breaks, {} gaps",
        entries.len(),
        summary.timing_fixes,
        summary.line_break_fixes,
        summary.gap_fixes
    );

    repaired
}
