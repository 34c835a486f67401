//! Immutable, shareable UTF-8 text with a cached grapheme count.
//!
//! String values index by grapheme (user-perceived character), not by byte.
//! Counting graphemes means scanning the whole buffer, so the count is
//! computed on first use and cached in the shared buffer: every clone of a
//! `Utf8Text` sees the cached result.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use unicode_segmentation::UnicodeSegmentation;

use crate::heap::Heap;
use crate::value::Value;

struct TextBuffer {
    text: String,
    /// Unset until the first `grapheme_len()` call.
    grapheme_len: OnceCell<usize>,
}

/// Shared UTF-8 string payload of [`Value::String`].
#[derive(Clone)]
pub struct Utf8Text(Heap<TextBuffer>);

impl Utf8Text {
    pub fn new(text: impl Into<String>) -> Self {
        Utf8Text(Heap::new(TextBuffer {
            text: text.into(),
            grapheme_len: OnceCell::new(),
        }))
    }

    /// Build from raw bytes. Input is expected to be valid UTF-8; invalid
    /// sequences are replaced with U+FFFD rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes).into_owned())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    /// Length in bytes. O(1).
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.0.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.text.is_empty()
    }

    /// Number of extended grapheme clusters. Scans once, then cached.
    pub fn grapheme_len(&self) -> usize {
        *self
            .0
            .grapheme_len
            .get_or_init(|| self.0.text.graphemes(true).count())
    }

    /// Whether the grapheme count has been computed yet.
    #[cfg(test)]
    pub(crate) fn grapheme_len_cached(&self) -> bool {
        self.0.grapheme_len.get().is_some()
    }

    /// The grapheme at `index`, or `None` when out of range.
    pub fn grapheme_at(&self, index: usize) -> Option<&str> {
        if index >= self.len_bytes() || index >= self.grapheme_len() {
            return None;
        }
        self.0.text.graphemes(true).nth(index)
    }

    /// Iterate one single-grapheme string value per grapheme.
    pub fn graphemes(&self) -> Graphemes {
        Graphemes {
            text: self.clone(),
            offset: 0,
        }
    }

    /// Whether both handles share one buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Heap::ptr_eq(&a.0, &b.0)
    }
}

impl From<&str> for Utf8Text {
    fn from(text: &str) -> Self {
        Utf8Text::new(text)
    }
}

impl From<String> for Utf8Text {
    fn from(text: String) -> Self {
        Utf8Text::new(text)
    }
}

impl PartialEq for Utf8Text {
    fn eq(&self, other: &Self) -> bool {
        Utf8Text::ptr_eq(self, other) || self.as_str() == other.as_str()
    }
}

impl Eq for Utf8Text {}

impl PartialOrd for Utf8Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Utf8Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Utf8Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for Utf8Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Utf8Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grapheme-by-grapheme iterator over a [`Utf8Text`].
///
/// Yields each grapheme as its own string value, front to back. Once
/// exhausted it stays exhausted; ask the text for a new iterator to restart.
pub struct Graphemes {
    text: Utf8Text,
    offset: usize,
}

impl Iterator for Graphemes {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let rest = self.text.as_str().get(self.offset..)?;
        let grapheme = rest.graphemes(true).next()?;
        self.offset += grapheme.len();
        Some(Value::string(grapheme))
    }
}

impl FusedIterator for Graphemes {}

/// Displays text in double quotes, escaping tab, newline, carriage return,
/// quote and backslash.
#[derive(Clone, Copy, Debug)]
pub struct QuotedString<'a>(pub &'a str);

impl fmt::Display for QuotedString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '\t' => f.write_str("\\t")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '"' | '\\' => write!(f, "\\{c}")?,
                _ => fmt::Write::write_char(f, c)?,
            }
        }
        f.write_str("\"")
    }
}

#[cfg(test)]
mod tests;
