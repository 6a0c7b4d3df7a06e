//! Pattern search over a snapshot.
//!
//! Search is total: a pattern that fails to parse behaves exactly like a
//! pattern with no occurrences. Forward search starts just past the caret
//! and wraps around to the top; backward search scans from the top up to
//! the caret and does not wrap.

use bitflags::bitflags;
use regex::RegexBuilder;
use tracing::debug;
use vix_text::{BufferSnapshot, Span, TextSnapshot};

/// Direction of a pattern search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPath {
    Forward,
    Backward,
}

bitflags! {
    /// Search behavior toggles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SearchFlags: u8 {
        const IGNORE_CASE = 0b0000_0001;
        /// Disable the forward wraparound.
        const NO_WRAP     = 0b0000_0010;
    }
}

/// Find the next occurrence of `pattern` relative to `start` (an absolute
/// char offset). The returned span covers the matched text. `None` means
/// no match — including the malformed-pattern case, which is logged and
/// otherwise indistinguishable from a miss.
pub fn find_next_match(
    snapshot: &BufferSnapshot,
    pattern: &str,
    path: SearchPath,
    flags: SearchFlags,
    start: usize,
) -> Option<Span> {
    let regex = match RegexBuilder::new(pattern)
        .case_insensitive(flags.contains(SearchFlags::IGNORE_CASE))
        .build()
    {
        Ok(re) => re,
        Err(err) => {
            debug!(target: "motion.search", %err, "pattern failed to parse");
            return None;
        }
    };

    let text = snapshot.slice(Span::new(0, snapshot.char_count()));
    // Byte offset of each char, for translating regex byte positions.
    let char_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    let byte_of = |char_offset: usize| {
        char_starts
            .get(char_offset)
            .copied()
            .unwrap_or(text.len())
    };
    let char_of = |byte_offset: usize| {
        char_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i)
    };

    match path {
        SearchPath::Forward => {
            let from = byte_of(start.saturating_add(1).min(snapshot.char_count()));
            if let Some(m) = regex.find(&text[from..]) {
                return Some(Span::from_bounds(
                    char_of(from + m.start()),
                    char_of(from + m.end()),
                ));
            }
            if flags.contains(SearchFlags::NO_WRAP) {
                return None;
            }
            regex
                .find(&text)
                .map(|m| Span::from_bounds(char_of(m.start()), char_of(m.end())))
        }
        SearchPath::Backward => {
            let limit = byte_of(start);
            let mut best = None;
            for m in regex.find_iter(&text) {
                if m.start() < limit {
                    best = Some(Span::from_bounds(char_of(m.start()), char_of(m.end())));
                } else {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(text: &str) -> BufferSnapshot {
        BufferSnapshot::from_text(text)
    }

    #[test]
    fn forward_finds_next_occurrence() {
        let s = snap("cat dog cat");
        let hit = find_next_match(&s, "cat", SearchPath::Forward, SearchFlags::empty(), 0).unwrap();
        assert_eq!(hit, Span::from_bounds(8, 11));
    }

    #[test]
    fn forward_wraps_around() {
        let s = snap("cat dog");
        let hit = find_next_match(&s, "cat", SearchPath::Forward, SearchFlags::empty(), 5).unwrap();
        assert_eq!(hit, Span::from_bounds(0, 3));
        assert_eq!(
            find_next_match(&s, "cat", SearchPath::Forward, SearchFlags::NO_WRAP, 5),
            None
        );
    }

    #[test]
    fn backward_does_not_wrap() {
        let s = snap("cat dog cat");
        let hit = find_next_match(&s, "cat", SearchPath::Backward, SearchFlags::empty(), 8).unwrap();
        assert_eq!(hit, Span::from_bounds(0, 3));
        assert_eq!(
            find_next_match(&s, "dog", SearchPath::Backward, SearchFlags::empty(), 3),
            None
        );
    }

    #[test]
    fn ignore_case_flag() {
        let s = snap("Cat dog");
        assert_eq!(
            find_next_match(&s, "cat", SearchPath::Forward, SearchFlags::empty(), 3),
            None
        );
        assert_eq!(
            find_next_match(&s, "CAT", SearchPath::Forward, SearchFlags::IGNORE_CASE, 3),
            Some(Span::from_bounds(0, 3))
        );
    }

    #[test]
    fn invalid_pattern_is_a_miss_not_an_error() {
        let s = snap("cat [dog");
        assert_eq!(
            find_next_match(&s, "[", SearchPath::Forward, SearchFlags::empty(), 0),
            None
        );
    }

    #[test]
    fn multibyte_offsets_are_char_based() {
        let s = snap("héllo dog");
        let hit = find_next_match(&s, "dog", SearchPath::Forward, SearchFlags::empty(), 0).unwrap();
        assert_eq!(hit, Span::from_bounds(6, 9));
        assert_eq!(s.slice(hit), "dog");
    }
}
