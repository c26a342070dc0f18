use super::*;

fn gb18030_bytes(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = GB18030.encode(text);
    assert!(!had_errors);
    bytes.into_owned()
}

// ========================================================================
// Alias normalization
// ========================================================================

#[test]
fn test_gb2312_family_widened() {
    assert_eq!(normalize_encoding("gb2312"), "gb18030");
    assert_eq!(normalize_encoding("GBK"), "gb18030");
    assert_eq!(normalize_encoding(" GB-2312 "), "gb18030");
}

#[test]
fn test_other_labels_lowercased_only() {
    assert_eq!(normalize_encoding("UTF-8"), "utf-8");
    assert_eq!(normalize_encoding("Big5"), "big5");
}

// ========================================================================
// Strict and fallback decoding
// ========================================================================

#[test]
fn test_declared_gb2312_decodes_gb18030_text() {
    let bytes = gb18030_bytes("第一章 起源\n正文");
    let decoded = decode(&bytes, "gb2312");

    assert_eq!(decoded.text, "第一章 起源\n正文");
    assert_eq!(decoded.encoding, "gb18030");
    assert!(!decoded.lossy);
}

#[test]
fn test_utf8_declared_as_gbk_falls_back() {
    // E4 B8 AD 0A: the dangling AD lead byte before '\n' is invalid GB18030
    let decoded = decode("中\n文".as_bytes(), "gbk");

    assert_eq!(decoded.text, "中\n文");
    assert!(!decoded.lossy);
    assert_eq!(decoded.encoding, "utf-8-sig");
}

#[test]
fn test_bom_stripped_by_utf8_sig_fallback() {
    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend_from_slice("外传".as_bytes());
    // ASCII-only declared label that rejects the BOM bytes
    let decoded = decode(&bytes, "us-ascii-unknown");

    assert_eq!(decoded.encoding, "utf-8-sig");
    assert_eq!(decoded.text, "外传");
}

#[test]
fn test_declared_utf8_keeps_bom_character() {
    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend_from_slice(b"abc");
    let decoded = decode(&bytes, "utf-8");

    assert_eq!(decoded.encoding, "utf-8");
    assert_eq!(decoded.text, "\u{FEFF}abc");
}

#[test]
fn test_gb18030_fallback_for_utf8_declared() {
    let bytes = gb18030_bytes("悟道外传");
    let decoded = decode(&bytes, "utf-8");

    assert_eq!(decoded.encoding, "gb18030");
    assert_eq!(decoded.text, "悟道外传");
}

#[test]
fn test_corrupt_bytes_degrade_to_replacement() {
    let bytes = b"ok \xFF\xFF\xFF end";
    let decoded = decode(bytes, "utf-8");

    assert!(decoded.lossy);
    assert!(decoded.text.contains('\u{FFFD}'));
    assert!(decoded.text.starts_with("ok "));
    assert!(decoded.text.ends_with(" end"));
}

#[test]
fn test_unknown_label_corrupt_bytes_still_decode() {
    let decoded = decode(b"\xFF\xFE\xFF", "no-such-encoding");

    assert!(decoded.lossy);
    assert!(decoded.text.contains('\u{FFFD}'));
}

#[test]
fn test_empty_input() {
    let decoded = decode(b"", "gb2312");
    assert_eq!(decoded.text, "");
    assert!(!decoded.lossy);
}

// ========================================================================
// Line splitting
// ========================================================================

#[test]
fn test_split_lines_normalizes_endings() {
    let lines = split_lines("a\r\nb\rc\nd");
    assert_eq!(lines, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_split_lines_trailing_newline() {
    let lines = split_lines("a\n");
    assert_eq!(lines, vec!["a", ""]);
}

#[test]
fn test_split_lines_empty_text() {
    assert_eq!(split_lines(""), vec![""]);
}

#[test]
fn test_split_lines_drops_leading_bom() {
    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend_from_slice("第一章 甲\n正文".as_bytes());
    let decoded = decode(&bytes, "utf-8");

    let lines = split_lines(&decoded.text);
    assert_eq!(lines, vec!["第一章 甲", "正文"]);
    assert_eq!(crate::heading::classify(&lines[0]).as_deref(), Some("第一章 甲"));
}

#[test]
fn test_split_lines_keeps_inner_bom() {
    assert_eq!(split_lines("a\n\u{FEFF}b"), vec!["a", "\u{FEFF}b"]);
}

#[test]
fn test_read_text_missing_file() {
    let result = read_text(Path::new("/nonexistent/novel.txt"), "utf-8");
    assert!(matches!(result, Err(SplitError::Io { .. })));
}
