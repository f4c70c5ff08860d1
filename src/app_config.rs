//! Application configuration module
//!
//! This module holds the Netflix Timed Text Style Guide limits (per-language
//! line length and reading speed, global timing constants) and the run
//! configuration loaded from an optional JSON file.

use anyhow::{Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;

/// Language used when a code is unknown or auto-detection finds nothing better
pub const DEFAULT_LANGUAGE: &str = "en";

/// Minimum cue duration in milliseconds (5/6 of a second)
pub const MIN_DURATION_MS: i64 = 833;

/// Maximum cue duration in milliseconds
pub const MAX_DURATION_MS: i64 = 7_000;

/// Minimum gap between consecutive cues in milliseconds (2 frames at 24fps)
pub const MIN_GAP_MS: i64 = 83;

/// Per-language limits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageRules {
    /// Display name of the language
    pub name: &'static str,

    /// Maximum display width of a single line
    pub max_chars: usize,

    /// Maximum characters per second for general audiences
    pub max_cps: f64,

    /// Maximum characters per second for children's content
    pub max_cps_kids: f64,
}

impl LanguageRules {
    /// Reading speed threshold for the given audience
    pub fn cps_limit(&self, kids_mode: bool) -> f64 {
        if kids_mode { self.max_cps_kids } else { self.max_cps }
    }
}

/// Timing constants shared by every language
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingRules {
    pub min_duration_ms: i64,
    pub max_duration_ms: i64,
    pub min_gap_ms: i64,
}

impl Default for TimingRules {
    fn default() -> Self {
        Self {
            min_duration_ms: MIN_DURATION_MS,
            max_duration_ms: MAX_DURATION_MS,
            min_gap_ms: MIN_GAP_MS,
        }
    }
}

/// Fallback rules for unknown language codes
static ENGLISH_RULES: LanguageRules = LanguageRules {
    name: "English",
    max_chars: 42,
    max_cps: 17.0,
    max_cps_kids: 15.0,
};

/// Fixed lookup table of Netflix limits keyed by ISO 639-1 code
static LANGUAGE_RULES: Lazy<HashMap<&'static str, LanguageRules>> = Lazy::new(|| {
    let rule = |name, max_chars, max_cps, max_cps_kids| LanguageRules {
        name,
        max_chars,
        max_cps,
        max_cps_kids,
    };

    HashMap::from([
        (DEFAULT_LANGUAGE, ENGLISH_RULES.clone()),
        ("zh", rule("Chinese", 16, 9.0, 7.0)),
        ("ja", rule("Japanese", 13, 4.0, 4.0)),
        ("ko", rule("Korean", 16, 12.0, 9.0)),
        ("es", rule("Spanish", 42, 17.0, 13.0)),
        ("fr", rule("French", 42, 17.0, 15.0)),
        ("de", rule("German", 42, 17.0, 13.0)),
    ])
});

/// Look up the rules for a language, falling back to English for unknown codes
pub fn rules_for(language: &str) -> &'static LanguageRules {
    let code = language_utils::normalize_language_code(language);
    LANGUAGE_RULES.get(code.as_str()).unwrap_or(&ENGLISH_RULES)
}

/// Everything the validator and repair engine need to judge one file
#[derive(Debug, Clone, PartialEq)]
pub struct Ruleset {
    /// Normalized language code, drives width measurement
    pub language: String,

    /// Line length and reading speed limits for `language`
    pub rules: LanguageRules,

    /// Duration and gap limits
    pub timing: TimingRules,

    /// Apply the children's reading speed limit
    pub kids_mode: bool,
}

impl Ruleset {
    pub fn for_language(language: &str, kids_mode: bool) -> Self {
        Self {
            language: language_utils::normalize_language_code(language),
            rules: rules_for(language).clone(),
            timing: TimingRules::default(),
            kids_mode,
        }
    }

    /// Active reading speed threshold
    pub fn cps_limit(&self) -> f64 {
        self.rules.cps_limit(self.kids_mode)
    }

    pub fn is_cjk(&self) -> bool {
        language_utils::is_cjk(&self.language)
    }
}

/// Codes with a dedicated entry in the rule table, sorted
pub fn supported_languages() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = LANGUAGE_RULES.keys().copied().collect();
    codes.sort_unstable();
    codes
}

/// Report output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Represents the run configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Explicit language code; auto-detected from the cues when absent
    pub language: Option<String>,

    /// Apply the children's reading speed limits
    pub kids_mode: bool,

    /// Report output format
    pub output_format: OutputFormat,

    /// Log level
    pub log_level: LogLevel,
}

impl Config {
    /// Load a config file, or the defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values.
    ///
    /// An unrecognized language code is not fatal: the run continues with
    /// English limits, and only a blank code is rejected.
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(AppError::Config("Language code must not be empty".to_string()).into());
            }
            if let Err(e) = language_utils::validate_language_code(language) {
                warn!("{}; using {} rules", e, ENGLISH_RULES.name);
            } else if !LANGUAGE_RULES.contains_key(language_utils::normalize_language_code(language).as_str()) {
                warn!("No dedicated rules for '{}'; using {} rules", language, ENGLISH_RULES.name);
            }
        }

        Ok(())
    }
}
