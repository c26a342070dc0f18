use super::*;

// ========================================================================
// Volume/chapter rule
// ========================================================================

#[test]
fn test_chapter_heading_title_is_whole_line() {
    assert_eq!(classify("第一章 起源"), Some("第一章 起源".to_string()));
    assert_eq!(classify("第二章 风起"), Some("第二章 风起".to_string()));
}

#[test]
fn test_chapter_heading_trims_surrounding_whitespace() {
    assert_eq!(classify("  第十章　决战  "), Some("第十章　决战".to_string()));
}

#[test]
fn test_chapter_heading_arabic_numerals() {
    assert_eq!(classify("第12章"), Some("第12章".to_string()));
}

#[test]
fn test_volume_prefix_with_chapter() {
    let line = "第五卷名震一方第六百四十八章至木灵婴";
    let heading = default_classifier().classify_heading(line).unwrap();

    assert_eq!(heading.kind, HeadingKind::Chapter);
    assert_eq!(heading.title, line);
}

#[test]
fn test_volume_without_chapter_is_not_heading() {
    assert_eq!(classify("第五卷 名震一方"), None);
}

#[test]
fn test_chapter_marker_must_start_line() {
    assert_eq!(classify("他翻到第一章看了看"), None);
}

#[test]
fn test_non_numeral_chapter_marker_rejected() {
    assert_eq!(classify("第几章"), None);
}

// ========================================================================
// Side-story rule
// ========================================================================

#[test]
fn test_side_story_heading() {
    let heading = default_classifier().classify_heading("悟道外传").unwrap();
    assert_eq!(heading.kind, HeadingKind::SideStory);
    assert_eq!(heading.title, "悟道外传");
}

#[test]
fn test_bare_marker_alone_is_heading() {
    assert_eq!(classify("外传"), Some("外传".to_string()));
    assert_eq!(classify("  外传 "), Some("外传".to_string()));
}

#[test]
fn test_marker_not_at_end_rejected() {
    assert_eq!(classify("悟道外传之后"), None);
}

#[test]
fn test_side_story_length_limit() {
    let fits = format!("{}外传", "字".repeat(40));
    let too_long = format!("{}外传", "字".repeat(41));

    assert_eq!(classify(&fits), Some(fits.clone()));
    assert_eq!(classify(&too_long), None);
}

#[test]
fn test_chapter_rule_wins_over_side_story() {
    let heading = default_classifier()
        .classify_heading("第三章 韩立外传")
        .unwrap();
    assert_eq!(heading.kind, HeadingKind::Chapter);
}

#[test]
fn test_side_story_guard() {
    assert!(side_story_guard_accepts("外传", "外传"));
    assert!(side_story_guard_accepts("悟道外传", "悟道外传"));
    assert!(!side_story_guard_accepts("外传", "前情 外传"));
}

fn side_story_guard_accepts(title: &str, line: &str) -> bool {
    let classifier = HeadingClassifier::new();
    let rule = &classifier.rules[1];
    match rule.guard {
        Some(guard) => guard(title, line),
        None => true,
    }
}

// ========================================================================
// Blank lines and custom tables
// ========================================================================

#[test]
fn test_blank_lines_never_headings() {
    assert_eq!(classify(""), None);
    assert_eq!(classify("   \t "), None);
    assert_eq!(classify("\u{3000}"), None);
}

#[test]
fn test_plain_prose_not_heading() {
    assert_eq!(classify("韩立站在山门前，默然不语。"), None);
}

#[test]
fn test_custom_rule_uses_capture_group() {
    let rule = HeadingRule::new(HeadingKind::Chapter, r"^Chapter \d+: (.+)$").unwrap();
    let classifier = HeadingClassifier::with_rules(vec![rule]);

    assert_eq!(classifier.rule_count(), 1);
    assert_eq!(
        classifier.classify("Chapter 3:  The Gate "),
        Some("The Gate".to_string())
    );
    assert_eq!(classifier.classify("第一章 起源"), None);
}

#[test]
fn test_default_rule_order() {
    let rules = default_rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].kind, HeadingKind::Chapter);
    assert_eq!(rules[1].kind, HeadingKind::SideStory);
}
