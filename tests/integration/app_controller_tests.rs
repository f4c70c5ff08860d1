/*!
 * Tests for the application controller against real files
 */

use anyhow::Result;
use netflix_subs::app_config::Config;
use netflix_subs::app_controller::Controller;
use netflix_subs::file_utils::FileManager;
use netflix_subs::subtitle_processor::SubtitleCollection;
use netflix_subs::validation::IssueKind;
use crate::common;

fn english_controller(kids_mode: bool) -> Result<Controller> {
    Controller::with_config(Config {
        language: Some("en".to_string()),
        kids_mode,
        ..Default::default()
    })
}

/// Test that a compliant file validates cleanly
#[test]
fn test_validate_withCompliantFile_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "ok.srt")?;

    let report = english_controller(false)?.validate(&input)?;

    assert!(report.passed());
    assert_eq!(report.total_entries, 3);
    assert!(report.source.ends_with("ok.srt"));
    Ok(())
}

/// Test that kids mode tightens the reading speed limit
#[test]
fn test_validate_withKidsMode_shouldFlagFasterCue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // 16 chars over 1s: within 17 CPS, above the kids limit of 15
    let input = common::create_test_file(
        temp_dir.path(),
        "kids.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nSixteen chars ok\n",
    )?;

    assert!(english_controller(false)?.validate(&input)?.passed());

    let report = english_controller(true)?.validate(&input)?;
    assert!(report.kids_mode);
    assert_eq!(report.summary.count(IssueKind::ReadingSpeedExceeded), 1);
    Ok(())
}

/// Test that fix writes a compliant file and leaves the input alone
#[test]
fn test_fix_withFaultyFile_shouldWriteRepairedOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "faulty.srt", common::FAULTY_SRT)?;
    let output = temp_dir.path().join("fixed").join("faulty.srt");

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.fix(&input, &output)?;

    assert_eq!(summary.total_entries, 3);
    assert!(summary.residual.passed());
    assert_eq!(FileManager::read_input(&input)?, common::FAULTY_SRT);

    let written = FileManager::read_input(&output)?;
    assert_eq!(written, summary.output);
    assert!(controller.validate(&output)?.passed());
    Ok(())
}

/// Test that residual violations are reported without failing the run
#[test]
fn test_fix_withUnfixableSpeed_shouldReportResidual() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "fast.srt",
        "1\n00:00:01,000 --> 00:00:01,200\nFar too many words for this cue\n",
    )?;
    let output = temp_dir.path().join("fast.fixed.srt");

    let summary = english_controller(false)?.fix(&input, &output)?;

    assert!(output.exists());
    assert_eq!(summary.residual.violations.len(), 1);
    assert_eq!(summary.residual.summary.count(IssueKind::ReadingSpeedExceeded), 1);
    Ok(())
}

/// Test that clean writes only the retained cues
#[test]
fn test_clean_withUnfixableCue_shouldWriteSurvivors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!(
        "{}\n4\n00:00:20,000 --> 00:00:20,100\nNobody can read all of this in time\n",
        common::COMPLIANT_SRT
    );
    let input = common::create_test_file(temp_dir.path(), "mixed.srt", &content)?;
    let output = temp_dir.path().join("clean.srt");

    let summary = english_controller(false)?.clean(&input, &output)?;

    assert_eq!(summary.total_entries, 4);
    assert_eq!(summary.kept_entries, 3);
    assert_eq!(summary.removed[0].seq_num, 4);
    assert!(summary.residual.passed());
    assert_eq!(FileManager::read_input(&output)?, common::COMPLIANT_SRT);
    Ok(())
}

/// Test that language auto-detection feeds the ruleset
#[test]
fn test_load_collection_withoutLanguage_shouldDetectAndApplyRules() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // 10 ideographs = width 20, above the 16 column limit for Chinese
    let input = common::create_test_file(
        temp_dir.path(),
        "zh.srt",
        "1\n00:00:01,000 --> 00:00:04,000\n一二三四五六七八九十\n",
    )?;

    let controller = Controller::with_config(Config::default())?;
    let collection: SubtitleCollection = controller.load_collection(&input)?;
    assert_eq!(collection.source_language, "zh");

    let report = controller.validate_collection(&collection);
    assert_eq!(report.language_name, "Chinese");
    assert_eq!(report.summary.count(IssueKind::LineTooLong), 1);
    Ok(())
}

/// Test that a missing input file is an error
#[test]
fn test_validate_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    assert!(english_controller(false)?.validate(&missing).is_err());
    Ok(())
}
