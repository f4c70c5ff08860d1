/*!
 * Text measurement for subtitle compliance checks.
 *
 * Line length and reading speed are measured on display characters:
 * - Inline markup tags (`<i>`, `<font ...>`) are not counted
 * - Line breaks count as a single space
 * - In CJK languages every non-ASCII character occupies two columns
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language_utils;

// Angle-bracket tags, non-greedy and non-nested
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove inline markup tags
pub fn strip_markup(text: &str) -> String {
    MARKUP_REGEX.replace_all(text, "").into_owned()
}

/// Display width of a single character under the language's convention
pub fn char_width(c: char, cjk: bool) -> usize {
    if cjk && (c as u32) > 127 { 2 } else { 1 }
}

/// Display width of a line or whole cue text
pub fn display_width(text: &str, language: &str) -> usize {
    let cjk = language_utils::is_cjk(language);
    let visible = strip_markup(text).replace(['\n', '\r'], " ");

    visible.trim().chars().map(|c| char_width(c, cjk)).sum()
}

/// Characters per second over the full cue text
///
/// A zero or negative duration yields infinity so it always exceeds a limit.
pub fn reading_speed(text: &str, duration_ms: i64, language: &str) -> f64 {
    if duration_ms <= 0 {
        return f64::INFINITY;
    }

    display_width(text, language) as f64 / (duration_ms as f64 / 1000.0)
}
