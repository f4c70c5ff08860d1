//! Language utilities for ISO language code handling
//!
//! This module provides functions for validating and normalizing ISO 639-1
//! (2-letter) and ISO 639-2 (3-letter) language codes, classifying the
//! double-width CJK languages, and guessing a language from cue text.

use anyhow::{Result, anyhow};
use isolang::Language;
use log::debug;

use crate::app_config::DEFAULT_LANGUAGE;
use crate::subtitle_processor::SubtitleEntry;
use crate::validation::length::strip_markup;

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Languages measured with the double-width convention
const CJK_LANGUAGES: [&str; 3] = ["zh", "ja", "ko"];

/// Number of cues sampled by `detect_language`
const DETECTION_SAMPLE_SIZE: usize = 10;

/// Share of ideographs above which a sample is considered Chinese
const IDEOGRAPH_RATIO_THRESHOLD: f64 = 0.3;

/// Map an ISO 639-2/B code to its 639-2/T counterpart when they differ
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra", // French
        "ger" => "deu", // German
        "dut" => "nld", // Dutch
        "gre" => "ell", // Greek
        "chi" => "zho", // Chinese
        "cze" => "ces", // Czech
        "ice" => "isl", // Icelandic
        "alb" => "sqi", // Albanian
        "arm" => "hye", // Armenian
        "baq" => "eus", // Basque
        "bur" => "mya", // Burmese
        "per" => "fas", // Persian
        "geo" => "kat", // Georgian
        "may" => "msa", // Malay
        "mac" => "mkd", // Macedonian
        "rum" => "ron", // Romanian
        "slo" => "slk", // Slovak
        "wel" => "cym", // Welsh
        _ => return None,
    };
    Some(part2t)
}

/// Lowercased primary subtag: `zh-TW` and `zh_Hant` both become `zh`
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = primary_subtag(code);

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if part2b_to_part2t(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let normalized_code = primary_subtag(code);

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        let part2t = part2b_to_part2t(&normalized_code).unwrap_or(normalized_code.as_str());

        if let Some(lang) = Language::from_639_3(part2t) {
            if let Some(code_639_1) = lang.to_639_1() {
                return Ok(code_639_1.to_string());
            }
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a code for rule lookup; unrecognized codes keep their primary subtag
pub fn normalize_language_code(code: &str) -> String {
    normalize_to_part1_or_part2t(code).unwrap_or_else(|_| primary_subtag(code))
}

/// Whether the language uses double-width measurement
pub fn is_cjk(code: &str) -> bool {
    let normalized = normalize_language_code(code);
    CJK_LANGUAGES.contains(&normalized.as_str())
}

fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}')
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

fn is_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

/// Guess the language of a subtitle file from the text of its first cues
///
/// This is a script heuristic, not language identification: kana means
/// Japanese, Hangul means Korean, a significant share of ideographs means
/// Chinese, and anything else is treated as the default language.
pub fn detect_language(entries: &[SubtitleEntry]) -> String {
    let mut total = 0usize;
    let mut kana = 0usize;
    let mut hangul = 0usize;
    let mut ideographs = 0usize;

    for entry in entries.iter().take(DETECTION_SAMPLE_SIZE) {
        for c in strip_markup(&entry.text).chars().filter(|c| !c.is_whitespace()) {
            total += 1;
            if is_kana(c) {
                kana += 1;
            } else if is_hangul(c) {
                hangul += 1;
            } else if is_ideograph(c) {
                ideographs += 1;
            }
        }
    }

    let detected = if kana > 0 {
        "ja"
    } else if hangul > 0 {
        "ko"
    } else if total > 0 && ideographs as f64 / total as f64 > IDEOGRAPH_RATIO_THRESHOLD {
        "zh"
    } else {
        DEFAULT_LANGUAGE
    };

    debug!(
        "Language detection sampled {} chars (kana: {}, hangul: {}, ideographs: {}) -> {}",
        total, kana, hangul, ideographs, detected
    );

    detected.to_string()
}
