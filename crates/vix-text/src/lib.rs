//! vix-text: snapshot and span primitives for the command engine.
//!
//! Everything in this crate operates on an immutable [`TextSnapshot`]. An
//! edit never mutates a snapshot in place; the owning buffer (vix-state)
//! produces a new snapshot and the old one stays valid for as long as any
//! consumer holds it. Offsets and columns are measured in `char`s, which
//! keeps span arithmetic exact across multi-byte text; grapheme-aware
//! display-width math belongs to the host view layer, not here.

pub mod charutil;
pub mod grapheme;
pub mod spans;
pub mod stream;

pub use spans::{BlockSpan, CharacterSpan, OperationKind};
pub use stream::CharStream;

use ropey::Rope;
use std::fmt;

/// A (line, column) pair. Both components are zero-based; `column` may equal
/// the line length, denoting the position just past the last character
/// (where the line break begins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line, self.column)
    }
}

/// A contiguous run of characters in a snapshot, as absolute char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Span covering `[start, end)`; callers guarantee `start <= end`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            length: end - start,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

/// Shape of one line as reported by a snapshot: where it starts, how many
/// characters of content it holds, and how long its line break is (0 for the
/// final line of a buffer without a trailing break).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub start: usize,
    pub length: usize,
    pub line_break_length: usize,
}

impl LineInfo {
    /// Offset just past the content, where the break (if any) begins.
    pub fn content_end(&self) -> usize {
        self.start + self.length
    }

    /// Offset just past the break; start of the next line.
    pub fn end_including_break(&self) -> usize {
        self.start + self.length + self.line_break_length
    }
}

/// The immutable-snapshot surface the engine consumes at the host boundary.
/// The engine never assumes anything about physical storage; the
/// in-workspace implementation is [`BufferSnapshot`], and tests substitute
/// it freely for a host snapshot.
pub trait TextSnapshot {
    /// Number of lines. A completely empty buffer still has one (empty) line.
    fn line_count(&self) -> usize;

    /// Line lookup by number.
    fn line(&self, line: usize) -> Option<LineInfo>;

    /// Total character length including line breaks.
    fn char_count(&self) -> usize;

    /// Extract the characters of `span` as an owned string.
    fn slice(&self, span: Span) -> String;

    /// Character at an absolute offset.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Resolve an absolute offset to a (line, column) point.
    fn point_of(&self, offset: usize) -> Option<Point> {
        if offset > self.char_count() {
            return None;
        }
        for line in 0..self.line_count() {
            let info = self.line(line)?;
            if offset < info.end_including_break()
                || (line + 1 == self.line_count() && offset <= info.end_including_break())
            {
                return Some(Point::new(line, offset - info.start));
            }
        }
        None
    }

    /// Resolve a point to an absolute offset. Columns past the content end
    /// (inside or beyond the line break) are rejected with `None` except the
    /// position exactly at content end, which is legal.
    fn offset_of(&self, point: Point) -> Option<usize> {
        let info = self.line(point.line)?;
        if point.column > info.length {
            return None;
        }
        Some(info.start + point.column)
    }

    /// Content of a line, excluding its line break.
    fn line_text(&self, line: usize) -> Option<String> {
        let info = self.line(line)?;
        Some(self.slice(Span::new(info.start, info.length)))
    }
}

/// Rope-backed snapshot. `Rope` is a persistent structure, so cloning one of
/// these to pin a point-in-time view is cheap; the editable buffer in
/// vix-state hands these out on every edit notification.
#[derive(Debug, Clone)]
pub struct BufferSnapshot {
    rope: Rope,
}

impl BufferSnapshot {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Join lines with `\n`. Test convenience mirroring how hosts hand over
    /// multi-line fixtures.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::from_text(&lines.join("\n"))
    }

    pub fn from_rope(rope: Rope) -> Self {
        Self { rope }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl TextSnapshot for BufferSnapshot {
    fn line_count(&self) -> usize {
        // Ropey counts a trailing "\n" as opening one more (empty) line,
        // which matches the snapshot contract directly.
        self.rope.len_lines()
    }

    fn line(&self, line: usize) -> Option<LineInfo> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(line);
        let raw = self.rope.line(line);
        let raw_len = raw.len_chars();
        let line_break_length = {
            let mut breaks = 0;
            if raw_len > 0 && raw.char(raw_len - 1) == '\n' {
                breaks = 1;
                if raw_len > 1 && raw.char(raw_len - 2) == '\r' {
                    breaks = 2;
                }
            }
            breaks
        };
        Some(LineInfo {
            start,
            length: raw_len - line_break_length,
            line_break_length,
        })
    }

    fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, span: Span) -> String {
        let end = span.end().min(self.rope.len_chars());
        let start = span.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    fn point_of(&self, offset: usize) -> Option<Point> {
        // Rope keeps line indexes, so skip the trait's per-line scan.
        if offset > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(offset);
        Some(Point::new(line, offset - self.rope.line_to_char(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_info_reports_breaks() {
        let snap = BufferSnapshot::from_text("cat\ndog");
        assert_eq!(snap.line_count(), 2);
        let l0 = snap.line(0).unwrap();
        assert_eq!((l0.start, l0.length, l0.line_break_length), (0, 3, 1));
        let l1 = snap.line(1).unwrap();
        assert_eq!((l1.start, l1.length, l1.line_break_length), (4, 3, 0));
        assert!(snap.line(2).is_none());
    }

    #[test]
    fn crlf_breaks_have_length_two() {
        let snap = BufferSnapshot::from_text("cat\r\ndog");
        let l0 = snap.line(0).unwrap();
        assert_eq!(l0.length, 3);
        assert_eq!(l0.line_break_length, 2);
        assert_eq!(snap.line(1).unwrap().start, 5);
    }

    #[test]
    fn point_offset_round_trip() {
        let snap = BufferSnapshot::from_text("foo bar\nbaz");
        let p = Point::new(1, 2);
        let off = snap.offset_of(p).unwrap();
        assert_eq!(off, 10);
        assert_eq!(snap.point_of(off), Some(p));
        // Column just past content is legal (caret at end of line).
        assert_eq!(snap.offset_of(Point::new(0, 7)), Some(7));
        // Column inside the line break is not.
        assert_eq!(snap.offset_of(Point::new(0, 8)), None);
        // The break char itself belongs to its line, and the offset one
        // past the end maps to the end of the last line.
        assert_eq!(snap.point_of(7), Some(Point::new(0, 7)));
        assert_eq!(snap.point_of(8), Some(Point::new(1, 0)));
        assert_eq!(snap.point_of(11), Some(Point::new(1, 3)));
        assert_eq!(snap.point_of(12), None);
    }

    #[test]
    fn slice_and_line_text() {
        let snap = BufferSnapshot::from_text("foo bar\nbaz");
        assert_eq!(snap.slice(Span::new(4, 3)), "bar");
        assert_eq!(snap.line_text(0).unwrap(), "foo bar");
        assert_eq!(snap.line_text(1).unwrap(), "baz");
    }

    #[test]
    fn empty_buffer_is_one_empty_line() {
        let snap = BufferSnapshot::from_text("");
        assert_eq!(snap.line_count(), 1);
        let info = snap.line(0).unwrap();
        assert_eq!((info.start, info.length, info.line_break_length), (0, 0, 0));
    }
}
