//! Grapheme-cluster boundary helpers in char-column terms.
//!
//! Horizontal caret motion steps over whole clusters (a combining sequence
//! moves as one unit) while the rest of the engine keeps measuring columns
//! in chars. These helpers translate between the two: given a line's text
//! and a char column, find the neighboring cluster boundary as a char
//! column.

use unicode_segmentation::UnicodeSegmentation;

/// Char column of the cluster boundary after `col`. Returns `col` unchanged
/// when already at or past the end of the line.
pub fn next_boundary(line: &str, col: usize) -> usize {
    let mut chars_seen = 0;
    for cluster in line.graphemes(true) {
        let cluster_chars = cluster.chars().count();
        if chars_seen + cluster_chars > col {
            return chars_seen + cluster_chars;
        }
        chars_seen += cluster_chars;
    }
    chars_seen
}

/// Char column of the cluster boundary at or before `col - 1`. Returns 0 at
/// the start of the line.
pub fn prev_boundary(line: &str, col: usize) -> usize {
    let mut prev = 0;
    let mut chars_seen = 0;
    for cluster in line.graphemes(true) {
        if chars_seen >= col {
            break;
        }
        prev = chars_seen;
        chars_seen += cluster.chars().count();
    }
    if chars_seen >= col { prev } else { chars_seen }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_boundaries_step_by_one() {
        assert_eq!(next_boundary("cat", 0), 1);
        assert_eq!(next_boundary("cat", 2), 3);
        assert_eq!(next_boundary("cat", 3), 3);
        assert_eq!(prev_boundary("cat", 3), 2);
        assert_eq!(prev_boundary("cat", 0), 0);
    }

    #[test]
    fn combining_mark_moves_as_a_unit() {
        // "e" + COMBINING ACUTE is one cluster of two chars.
        let s = "e\u{0301}x";
        assert_eq!(next_boundary(s, 0), 2);
        assert_eq!(prev_boundary(s, 2), 0);
        assert_eq!(next_boundary(s, 2), 3);
    }
}
