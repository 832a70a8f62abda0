use super::*;
use pretty_assertions::assert_eq;

#[test]
fn span_display() {
    let span = Span::new(10, 20);
    assert_eq!(span.to_string(), "10..20");
    assert_eq!(format!("{span:?}"), "10..20");
}

#[test]
fn from_range_saturates() {
    let span = Span::from_range(3..usize::MAX);
    assert_eq!(span.start, 3);
    assert_eq!(span.end, u32::MAX);
}

#[test]
fn location_first_line() {
    assert_eq!(Location::of("abc", 0), Location { line: 1, column: 1 });
    assert_eq!(Location::of("abc", 2), Location { line: 1, column: 3 });
}

#[test]
fn location_after_newlines() {
    let source = "function () {\n  return a\n}";
    let offset = u32::try_from(source.find("return").unwrap_or(0)).unwrap_or(0);
    assert_eq!(Location::of(source, offset), Location { line: 2, column: 3 });
}

#[test]
fn location_unicode_line_separators() {
    let source = "a\u{2028}b\u{2029}c";
    let offset = u32::try_from(source.find('c').unwrap_or(0)).unwrap_or(0);
    assert_eq!(Location::of(source, offset), Location { line: 3, column: 1 });
}

#[test]
fn location_counts_characters() {
    let source = "é = 1";
    assert_eq!(Location::of(source, 3), Location { line: 1, column: 3 });
}

#[test]
fn location_past_end() {
    assert_eq!(Location::of("ab", 50), Location { line: 1, column: 3 });
    assert_eq!(Location::of("a", 0).to_string(), "1:1");
}
