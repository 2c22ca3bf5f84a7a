//! Fragment location over the plain-text projection.
//!
//! The user highlights plain text, but the document carries markup around
//! and inside it. Lookup therefore runs against `Markup::plain_text()`, and
//! the returned ranges are char offsets in that projection; a range may
//! cross any number of text-leaf boundaries.

use std::ops::Range;

use crate::markup::Markup;

/// One occurrence of a fragment, in char offsets of the projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub start: usize,
    pub len: usize,
}

impl Occurrence {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn overlaps(&self, other: &Range<usize>) -> bool {
        self.start < other.end && other.start < self.end()
    }
}

/// Find every occurrence of `fragment` in `content`, in document order,
/// overlapping occurrences included. An empty result means the fragment's
/// exact text (whitespace included) is no longer present; the caller
/// treats that as the expected concurrent-edit failure mode.
pub fn locate(content: &Markup, fragment: &str) -> Vec<Occurrence> {
    if fragment.is_empty() {
        return Vec::new();
    }
    occurrences(&content.plain_text(), fragment)
}

pub(crate) fn occurrences(haystack: &str, fragment: &str) -> Vec<Occurrence> {
    let fragment_chars = fragment.chars().count();
    let mut found = Vec::new();
    let mut from = 0usize; // byte offset of the search window
    let mut chars_before = 0usize; // chars preceding `from`
    while let Some(pos) = haystack[from..].find(fragment) {
        let start = from + pos;
        chars_before += haystack[from..start].chars().count();
        found.push(Occurrence {
            start: chars_before,
            len: fragment_chars,
        });
        // Advance one char so overlapping occurrences stay visible.
        let step = haystack[start..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        from = start + step;
        chars_before += 1;
    }
    found
}
