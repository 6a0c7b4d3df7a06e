//! Character-wise and block-wise region descriptors.
//!
//! Both span kinds are expressed in line/column terms rather than absolute
//! offsets, so they remain meaningful when earlier lines change length: a
//! `CharacterSpan` ends a fixed number of characters into its *last* line,
//! and a `BlockSpan` is rectangular in (line, column) space.

use crate::{Point, TextSnapshot};

/// Classification of a text region or register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CharacterWise,
    LineWise,
    BlockWise,
}

/// A run of text that may cross line boundaries without covering full lines:
/// a start point, the number of lines touched, and how many characters of
/// the final touched line are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSpan {
    pub start: Point,
    pub line_count: usize,
    pub last_line_length: usize,
}

impl CharacterSpan {
    pub fn new(start: Point, line_count: usize, last_line_length: usize) -> Self {
        debug_assert!(line_count >= 1);
        Self {
            start,
            line_count,
            last_line_length,
        }
    }

    /// Single-line span of `length` characters starting at `start`.
    pub fn single_line(start: Point, length: usize) -> Self {
        Self::new(start, 1, length)
    }

    /// The line the span ends on.
    pub fn last_line(&self) -> usize {
        self.start.line + self.line_count - 1
    }

    /// End point (exclusive). On a single-line span this is `start.column +
    /// last_line_length`; on a multi-line span it is `last_line_length`
    /// characters into the last line, independent of the start column.
    pub fn end_point(&self) -> Point {
        if self.line_count == 1 {
            Point::new(self.start.line, self.start.column + self.last_line_length)
        } else {
            Point::new(self.last_line(), self.last_line_length)
        }
    }

    /// Materialize as an absolute offset span against a snapshot. Spans whose
    /// points fall outside the snapshot resolve to `None`.
    pub fn to_span(&self, snapshot: &dyn TextSnapshot) -> Option<crate::Span> {
        let start = snapshot.offset_of(self.start)?;
        let end_point = self.end_point();
        // A multi-line span's interior includes the line breaks, so the end
        // offset comes from resolving the end point, not from adding lengths.
        let end = snapshot.offset_of(end_point)?;
        Some(crate::Span::from_bounds(start, end))
    }
}

/// A rectangular visual-block region: start point, width in columns, height
/// in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: Point,
    pub width: usize,
    pub height: usize,
}

impl BlockSpan {
    pub fn new(start: Point, width: usize, height: usize) -> Self {
        debug_assert!(height >= 1);
        Self {
            start,
            width,
            height,
        }
    }

    /// End point of the block. Height 1 ends `width` columns past the start
    /// on the same line; taller blocks end on the line `height - 1` below
    /// the start, `width` columns from *that line's* start.
    pub fn end_point(&self) -> Point {
        if self.height == 1 {
            Point::new(self.start.line, self.start.column + self.width)
        } else {
            Point::new(self.start.line + self.height - 1, self.width)
        }
    }

    /// The per-line column range covered by the block, clamped to each
    /// line's content. Lines shorter than the block's left edge contribute
    /// an empty string.
    pub fn line_slices(&self, snapshot: &dyn TextSnapshot) -> Vec<String> {
        let mut out = Vec::with_capacity(self.height);
        for row in 0..self.height {
            let line = self.start.line + row;
            let Some(info) = snapshot.line(line) else {
                break;
            };
            let left = self.start.column.min(info.length);
            let right = (self.start.column + self.width).min(info.length);
            out.push(snapshot.slice(crate::Span::from_bounds(
                info.start + left,
                info.start + right,
            )));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferSnapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn character_span_single_line_end() {
        let span = CharacterSpan::single_line(Point::new(0, 2), 3);
        assert_eq!(span.end_point(), Point::new(0, 5));
    }

    #[test]
    fn character_span_multi_line_end_ignores_start_column() {
        let span = CharacterSpan::new(Point::new(1, 4), 3, 2);
        assert_eq!(span.end_point(), Point::new(3, 2));
    }

    #[test]
    fn character_span_resolves_across_breaks() {
        let snap = BufferSnapshot::from_lines(&["cat", "dog", "fish"]);
        let span = CharacterSpan::new(Point::new(0, 1), 2, 2);
        let abs = span.to_span(&snap).unwrap();
        assert_eq!(snap.slice(abs), "at\ndo");
    }

    #[test]
    fn block_span_end_single_height() {
        let block = BlockSpan::new(Point::new(0, 0), 2, 1);
        assert_eq!(block.end_point(), Point::new(0, 2));
    }

    #[test]
    fn block_span_end_multi_height() {
        let block = BlockSpan::new(Point::new(0, 0), 2, 2);
        assert_eq!(block.end_point(), Point::new(1, 2));
        // Rectangular: a start column > 0 still ends `width` into the last line.
        let shifted = BlockSpan::new(Point::new(0, 3), 2, 2);
        assert_eq!(shifted.end_point(), Point::new(1, 2));
    }

    #[test]
    fn block_line_slices_clamp_to_short_lines() {
        let snap = BufferSnapshot::from_lines(&["catfish", "a", "dogs"]);
        let block = BlockSpan::new(Point::new(0, 2), 3, 3);
        assert_eq!(block.line_slices(&snap), vec!["tfi", "", "gs"]);
    }
}
