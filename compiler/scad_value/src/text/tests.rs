use pretty_assertions::assert_eq;

use super::*;

#[test]
fn byte_and_grapheme_lengths_differ_for_multibyte_text() {
    let text = Utf8Text::new("\u{1F600}a");
    assert_eq!(text.len_bytes(), 5);
    assert_eq!(text.grapheme_len(), 2);
}

#[test]
fn grapheme_count_is_cached_and_shared_by_clones() {
    let text = Utf8Text::new("héllo");
    let copy = text.clone();
    assert!(!copy.grapheme_len_cached());
    assert_eq!(text.grapheme_len(), 5);
    assert!(copy.grapheme_len_cached());
    assert!(Utf8Text::ptr_eq(&text, &copy));
}

#[test]
fn grapheme_at_indexes_by_grapheme() {
    let text = Utf8Text::new("\u{1F600}a");
    assert_eq!(text.grapheme_at(0), Some("\u{1F600}"));
    assert_eq!(text.grapheme_at(1), Some("a"));
    assert_eq!(text.grapheme_at(2), None);
}

#[test]
fn combining_sequences_are_one_grapheme() {
    // "e" followed by a combining acute accent
    let text = Utf8Text::new("e\u{301}x");
    assert_eq!(text.grapheme_len(), 2);
    assert_eq!(text.grapheme_at(0), Some("e\u{301}"));
}

#[test]
fn graphemes_yield_single_grapheme_values() {
    let text = Utf8Text::new("a\u{e9}\u{1F600}");
    let parts: Vec<Value> = text.graphemes().collect();
    assert_eq!(
        parts,
        vec![
            Value::string("a"),
            Value::string("\u{e9}"),
            Value::string("\u{1F600}"),
        ]
    );
}

#[test]
fn graphemes_iterator_stays_exhausted() {
    let text = Utf8Text::new("z");
    let mut iter = text.graphemes();
    assert_eq!(iter.next(), Some(Value::string("z")));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(text.graphemes().count(), 1);
}

#[test]
fn empty_text() {
    let text = Utf8Text::new("");
    assert!(text.is_empty());
    assert_eq!(text.grapheme_len(), 0);
    assert_eq!(text.grapheme_at(0), None);
    assert_eq!(text.graphemes().next(), None);
}

#[test]
fn from_bytes_replaces_invalid_sequences() {
    let text = Utf8Text::from_bytes(b"ok\xff");
    assert_eq!(text.as_str(), "ok\u{FFFD}");
}

#[test]
fn ordering_is_bytewise() {
    assert!(Utf8Text::new("abc") < Utf8Text::new("abd"));
    assert!(Utf8Text::new("B") < Utf8Text::new("a"));
    assert_eq!(Utf8Text::new("same"), Utf8Text::new("same"));
}

#[test]
fn quoted_string_escapes() {
    let quoted = QuotedString("a\t\"b\"\\\n").to_string();
    assert_eq!(quoted, r#""a\t\"b\"\\\n""#);
}
