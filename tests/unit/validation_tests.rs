/*!
 * Tests for the validation checks through the public API
 */

use netflix_subs::app_config::Ruleset;
use netflix_subs::subtitle_processor::SubtitleEntry;
use netflix_subs::validation::length::{display_width, reading_speed};
use netflix_subs::validation::timecodes::validate_collection;
use netflix_subs::validation::{ComplianceIssue, IssueKind, ValidationService};

fn create_entry(seq: usize, start: i64, end: i64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(seq, start, end, text.to_string())
}

#[test]
fn test_displayWidth_withGuideExamples_shouldMatch() {
    assert_eq!(display_width("ab", "en"), 2);
    assert_eq!(display_width("日本語", "ja"), 6);
    assert_eq!(display_width("<i>hi</i>", "en"), 2);
    // Non-CJK languages count accented letters once
    assert_eq!(display_width("café", "fr"), 4);
}

#[test]
fn test_readingSpeed_withZeroOrNegativeDuration_shouldBeInfinite() {
    assert_eq!(reading_speed("anything", 0, "en"), f64::INFINITY);
    assert_eq!(reading_speed("anything", -40, "zh"), f64::INFINITY);
}

#[test]
fn test_validateEntry_withEveryLocalIssue_shouldReportInFixedOrder() {
    let service = ValidationService::new(Ruleset::for_language("en", false));
    let long_line = "x".repeat(50);
    let entry = create_entry(1, 0, 500, &format!("{}\nb\nc", long_line));

    let kinds: Vec<IssueKind> = service.validate_entry(&entry).iter().map(|i| i.kind()).collect();

    assert_eq!(
        kinds,
        vec![
            IssueKind::DurationTooShort,
            IssueKind::ReadingSpeedExceeded,
            IssueKind::LineTooLong,
            IssueKind::TooManyLines,
        ]
    );
}

#[test]
fn test_validateEntry_withChineseKidsMode_shouldUseKidsLimit() {
    // 8 ideographs = width 16 over 2s = 8 CPS: fine for adults (9), too fast for kids (7)
    let entry = create_entry(1, 0, 2000, "一二三四五六七八");

    let adult = ValidationService::new(Ruleset::for_language("zh", false));
    let kids = ValidationService::new(Ruleset::for_language("zh", true));

    assert!(adult.validate_entry(&entry).is_empty());
    assert_eq!(
        kids.validate_entry(&entry),
        vec![ComplianceIssue::ReadingSpeedExceeded { cps: 8.0, max_cps: 7.0 }]
    );
}

/// Local checks are reported in a first pass, gap checks in a second one
#[test]
fn test_validateCollection_withMixedIssues_shouldConcatenateTwoPasses() {
    let ruleset = Ruleset::for_language("en", false);
    let entries = vec![
        create_entry(1, 0, 2000, "Fine"),
        create_entry(2, 1900, 4000, "Overlapping"),
        create_entry(3, 5000, 5400, "Short"),
    ];

    let violations = validate_collection(&entries, &ruleset);

    let order: Vec<(usize, IssueKind)> = violations
        .iter()
        .map(|v| (v.seq_num, v.issues[0].kind()))
        .collect();
    assert_eq!(
        order,
        vec![(3, IssueKind::DurationTooShort), (2, IssueKind::Overlap)]
    );
    assert_eq!(violations[1].issues[0].to_string(), "Overlaps previous cue by 100ms");
}

#[test]
fn test_validateCollection_withZeroGap_shouldNotFlag() {
    let ruleset = Ruleset::for_language("en", false);
    let entries = vec![
        create_entry(1, 0, 2000, "One"),
        create_entry(2, 2000, 4000, "Two"),
    ];

    assert!(validate_collection(&entries, &ruleset).is_empty());
}
