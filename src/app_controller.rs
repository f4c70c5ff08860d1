use anyhow::{Result, Context};
use log::{info, warn, debug};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, Ruleset};
use crate::cleaner::{self, RemovedEntry};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::repair;
use crate::subtitle_processor::{format_srt, SubtitleCollection};
use crate::validation::service::{ValidationReport, ValidationService};

// @module: Application controller for subtitle compliance runs

/// Outcome of `fix`
#[derive(Debug, Clone)]
pub struct FixSummary {
    /// Corrected SRT text
    pub output: String,
    pub total_entries: usize,
    /// Violations still present in the corrected file
    pub residual: ValidationReport,
}

/// Outcome of `clean`
#[derive(Debug, Clone)]
pub struct CleanSummary {
    /// SRT text of the retained cues
    pub output: String,
    pub total_entries: usize,
    pub kept_entries: usize,
    pub removed: Vec<RemovedEntry>,
    /// Violations still present among the retained cues
    pub residual: ValidationReport,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse content and resolve its language
    pub fn parse_collection(&self, source_file: PathBuf, content: &str) -> Result<SubtitleCollection> {
        let collection = SubtitleCollection::from_srt_string(source_file, content, self.config.language.as_deref())
            .map_err(AppError::from)
            .context("Failed to parse subtitle content")?;

        if self.config.language.is_none() {
            info!("Detected language: {}", collection.source_language);
        }
        debug!("{}", collection);

        Ok(collection)
    }

    /// Read and parse an input file (`-` for standard input)
    pub fn load_collection(&self, input: &Path) -> Result<SubtitleCollection> {
        let content = FileManager::read_input(input)?;
        self.parse_collection(input.to_path_buf(), &content)
    }

    pub fn ruleset_for(&self, collection: &SubtitleCollection) -> Ruleset {
        let ruleset = Ruleset::for_language(&collection.source_language, self.config.kids_mode);
        debug!(
            "Rules for '{}': {} chars/line, {} CPS max, double-width: {}",
            ruleset.language,
            ruleset.rules.max_chars,
            ruleset.cps_limit(),
            ruleset.is_cjk()
        );
        ruleset
    }

    /// Validate a parsed collection
    pub fn validate_collection(&self, collection: &SubtitleCollection) -> ValidationReport {
        ValidationService::new(self.ruleset_for(collection)).validate_collection(collection)
    }

    /// Repair a parsed collection and re-validate the result
    pub fn fix_collection(&self, collection: &SubtitleCollection) -> FixSummary {
        let ruleset = self.ruleset_for(collection);
        let mut fixed = collection.clone();
        fixed.entries = repair::repair_all(&collection.entries, &ruleset);

        let residual = ValidationService::new(ruleset).validate_collection(&fixed);
        if residual.passed() {
            info!("Output passes all Netflix specs");
        } else {
            warn!("{} issues remain (may need manual review)", residual.violations.len());
        }

        FixSummary {
            output: fixed.to_srt_string(),
            total_entries: collection.entries.len(),
            residual,
        }
    }

    /// Repair a parsed collection, dropping cues that stay non-compliant
    pub fn clean_collection(&self, collection: &SubtitleCollection) -> CleanSummary {
        let ruleset = self.ruleset_for(collection);
        let outcome = cleaner::clean(&collection.entries, &ruleset);

        for removed in &outcome.removed {
            let messages: Vec<String> = removed.issues.iter().map(|i| i.to_string()).collect();
            info!("Removed #{}: {}", removed.seq_num, messages.join(", "));
        }

        let mut kept = collection.clone();
        kept.entries = outcome.kept;
        let residual = ValidationService::new(ruleset).validate_collection(&kept);
        if !residual.passed() {
            warn!("{} issues remain among kept cues", residual.violations.len());
        }

        CleanSummary {
            output: format_srt(&kept.entries),
            total_entries: collection.entries.len(),
            kept_entries: kept.entries.len(),
            removed: outcome.removed,
            residual,
        }
    }

    /// Validate an input file
    pub fn validate(&self, input: &Path) -> Result<ValidationReport> {
        let collection = self.load_collection(input)?;
        Ok(self.validate_collection(&collection))
    }

    /// Fix an input file and write the corrected version
    pub fn fix(&self, input: &Path, output: &Path) -> Result<FixSummary> {
        let collection = self.load_collection(input)?;
        let summary = self.fix_collection(&collection);

        FileManager::write_output(output, &summary.output)?;
        info!("Fixed {} entries -> {}", summary.total_entries, output.display());

        Ok(summary)
    }

    /// Clean an input file and write the retained cues
    pub fn clean(&self, input: &Path, output: &Path) -> Result<CleanSummary> {
        let collection = self.load_collection(input)?;
        let summary = self.clean_collection(&collection);

        FileManager::write_output(output, &summary.output)?;
        info!(
            "Kept {} of {} entries ({} removed) -> {}",
            summary.kept_entries,
            summary.total_entries,
            summary.removed.len(),
            output.display()
        );

        Ok(summary)
    }
}
