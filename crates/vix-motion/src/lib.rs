//! vix-motion: motion evaluation over immutable snapshots.
//!
//! A motion request names a starting point, an optional count and a motion
//! kind; evaluation produces a [`MotionData`] describing the affected span
//! together with the classification operators need: inclusive vs exclusive,
//! character- vs line-wise, whether a following line-wise operation should
//! land the caret on the first non-blank column, and the sticky column for
//! vertical motions. Evaluation never mutates anything and a motion that
//! cannot move (top of buffer, no match) reports `None`.

mod search;
mod words;

pub use search::{SearchFlags, SearchPath, find_next_match};

use tracing::trace;
use vix_text::{BufferSnapshot, OperationKind, Point, Span, TextSnapshot, charutil, grapheme};

/// Whether a motion's end point is part of the acted-upon span.
///
/// Spans in `MotionData` always cover exactly the affected characters; the
/// classification is still reported because caret placement differs (an
/// inclusive forward motion rests *on* the final character, an exclusive one
/// just past it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Inclusive,
    Exclusive,
}

/// Character-search variants (`f`, `F`, `t`, `T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSearchKind {
    /// `f` — onto the target character.
    ToChar,
    /// `t` — till just before the target character.
    TillChar,
    /// `F` — backward onto the target.
    BackToChar,
    /// `T` — backward till just after the target.
    BackTillChar,
}

/// The motion grammar the engine evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionKind {
    CharLeft,
    CharRight,
    LineUp,
    LineDown,
    LineStart,
    FirstNonBlank,
    LineEnd,
    /// `G` (`default_last: true`) and `gg`: to the count'th line, 1-based.
    GotoLine { default_last: bool },
    WordForward { big: bool },
    WordBackward { big: bool },
    EndOfWord { big: bool },
    SentenceForward,
    SentenceBackward,
    ParagraphForward,
    ParagraphBackward,
    CharSearch { kind: CharSearchKind, target: char },
    /// `/` and `?` as motions; the span runs to the match start.
    SearchPattern { pattern: String, path: SearchPath },
}

/// One motion to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionRequest {
    pub kind: MotionKind,
    pub start: Point,
    /// Absent means "no explicit count"; defaults to 1 at the point of use.
    pub count: Option<u32>,
    /// Sticky column carried across successive vertical motions.
    pub sticky_column: Option<usize>,
}

impl MotionRequest {
    pub fn new(kind: MotionKind, start: Point) -> Self {
        Self {
            kind,
            start,
            count: None,
            sticky_column: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_sticky_column(mut self, column: usize) -> Self {
        self.sticky_column = Some(column);
        self
    }

    fn effective_count(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}

/// Result of evaluating a motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionData {
    /// The affected characters, normalized so `start <= end`.
    pub span: Span,
    /// True when the motion ran toward the end of the buffer.
    pub is_forward: bool,
    pub inclusion: Inclusion,
    pub kind: OperationKind,
    /// After a line-wise operation the caret lands on the first non-blank
    /// column when set, otherwise on the literal column.
    pub move_to_first_non_blank: bool,
    /// Explicit target column of vertical motions (sticky column).
    pub explicit_column: Option<usize>,
}

impl MotionData {
    /// A motion evaluated without an explicit target column reports the
    /// start of its span; one evaluated with an explicit column reports the
    /// end point, so vertical column-stickiness composes with surrounding
    /// motions.
    pub fn column_or_first_point(&self, snapshot: &dyn TextSnapshot) -> Option<Point> {
        if self.explicit_column.is_none() {
            snapshot.point_of(self.span.start)
        } else {
            snapshot.point_of(self.span.end())
        }
    }

    /// Where the caret rests after a pure (operator-less) motion.
    pub fn caret_offset(&self) -> usize {
        if self.is_forward {
            match self.inclusion {
                Inclusion::Inclusive => self.span.end().saturating_sub(1),
                Inclusion::Exclusive => self.span.end(),
            }
        } else {
            self.span.start
        }
    }
}

/// Evaluate one motion against a snapshot.
pub fn evaluate(snapshot: &BufferSnapshot, request: &MotionRequest) -> Option<MotionData> {
    let start = snapshot.offset_of(request.start)?;
    let count = request.effective_count();
    trace!(target: "motion", kind = ?request.kind, start, count, "evaluate");
    match &request.kind {
        MotionKind::CharLeft => {
            let line = snapshot.line_text(request.start.line)?;
            let mut col = request.start.column.min(line.chars().count());
            for _ in 0..count {
                col = grapheme::prev_boundary(&line, col);
            }
            if col == request.start.column {
                return None;
            }
            let info = snapshot.line(request.start.line)?;
            Some(char_motion(
                Span::from_bounds(info.start + col, start),
                false,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::CharRight => {
            let line = snapshot.line_text(request.start.line)?;
            let len = line.chars().count();
            let mut col = request.start.column.min(len);
            for _ in 0..count {
                col = grapheme::next_boundary(&line, col).min(len);
            }
            if col == request.start.column {
                return None;
            }
            let info = snapshot.line(request.start.line)?;
            Some(char_motion(
                Span::from_bounds(start, info.start + col),
                true,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::LineUp => {
            let target = request.start.line.checked_sub(count as usize)?;
            Some(line_motion(snapshot, request, target, false)?)
        }
        MotionKind::LineDown => {
            let target = request.start.line + count as usize;
            if target >= snapshot.line_count() {
                return None;
            }
            Some(line_motion(snapshot, request, target, true)?)
        }
        MotionKind::LineStart => {
            let info = snapshot.line(request.start.line)?;
            if start == info.start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(info.start, start),
                false,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::FirstNonBlank => {
            let info = snapshot.line(request.start.line)?;
            let line = snapshot.line_text(request.start.line)?;
            let target = info.start + first_non_blank_column(&line);
            let (span, forward) = if target >= start {
                (Span::from_bounds(start, target), true)
            } else {
                (Span::from_bounds(target, start), false)
            };
            let mut data = char_motion(span, forward, Inclusion::Exclusive);
            data.move_to_first_non_blank = true;
            Some(data)
        }
        MotionKind::LineEnd => {
            let target_line = (request.start.line + count as usize - 1)
                .min(snapshot.line_count().saturating_sub(1));
            let info = snapshot.line(target_line)?;
            if info.content_end() <= start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(start, info.content_end()),
                true,
                Inclusion::Inclusive,
            ))
        }
        MotionKind::GotoLine { default_last } => {
            let target = match request.count {
                Some(n) => (n.max(1) as usize - 1).min(snapshot.line_count() - 1),
                None if *default_last => snapshot.line_count() - 1,
                None => 0,
            };
            let mut data = line_span_between(snapshot, request.start.line, target)?;
            data.move_to_first_non_blank = true;
            Some(data)
        }
        MotionKind::WordForward { big } => {
            let end = words::word_forward(snapshot, start, *big, count);
            if end == start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(start, end),
                true,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::WordBackward { big } => {
            let dest = words::word_backward(snapshot, start, *big, count);
            if dest == start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(dest, start),
                false,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::EndOfWord { big } => {
            let last = words::end_of_word(snapshot, start, *big, count)?;
            Some(char_motion(
                Span::from_bounds(start, last + 1),
                true,
                Inclusion::Inclusive,
            ))
        }
        MotionKind::SentenceForward => {
            let end = words::sentence_forward(snapshot, start, count);
            if end == start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(start, end),
                true,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::SentenceBackward => {
            let dest = words::sentence_backward(snapshot, start, count);
            if dest == start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(dest, start),
                false,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::ParagraphForward => {
            let end = words::paragraph_forward(snapshot, request.start.line, count);
            let target = snapshot.line(end)?.start;
            if target <= start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(start, target),
                true,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::ParagraphBackward => {
            let dest_line = words::paragraph_backward(snapshot, request.start.line, count);
            let target = snapshot.line(dest_line)?.start;
            if target >= start {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(target, start),
                false,
                Inclusion::Exclusive,
            ))
        }
        MotionKind::CharSearch { kind, target } => {
            char_search(snapshot, request, *kind, *target, count)
        }
        MotionKind::SearchPattern { pattern, path } => {
            let hit = find_next_match(snapshot, pattern, *path, SearchFlags::empty(), start)?;
            if hit.start == start {
                return None;
            }
            let (span, forward) = if hit.start > start {
                (Span::from_bounds(start, hit.start), true)
            } else {
                (Span::from_bounds(hit.start, start), false)
            };
            Some(char_motion(span, forward, Inclusion::Exclusive))
        }
    }
}

fn char_motion(span: Span, is_forward: bool, inclusion: Inclusion) -> MotionData {
    MotionData {
        span,
        is_forward,
        inclusion,
        kind: OperationKind::CharacterWise,
        move_to_first_non_blank: false,
        explicit_column: None,
    }
}

/// Line-wise span covering both endpoint lines in full.
fn line_span_between(snapshot: &BufferSnapshot, a: usize, b: usize) -> Option<MotionData> {
    let (first, last) = if a <= b { (a, b) } else { (b, a) };
    let start = snapshot.line(first)?.start;
    let end = snapshot.line(last)?.end_including_break();
    Some(MotionData {
        span: Span::from_bounds(start, end),
        is_forward: b >= a,
        inclusion: Inclusion::Inclusive,
        kind: OperationKind::LineWise,
        move_to_first_non_blank: false,
        explicit_column: None,
    })
}

fn line_motion(
    snapshot: &BufferSnapshot,
    request: &MotionRequest,
    target: usize,
    is_forward: bool,
) -> Option<MotionData> {
    let sticky = request.sticky_column.unwrap_or(request.start.column);
    let mut data = line_span_between(snapshot, request.start.line, target)?;
    data.is_forward = is_forward;
    data.explicit_column = Some(sticky);
    Some(data)
}

fn char_search(
    snapshot: &BufferSnapshot,
    request: &MotionRequest,
    kind: CharSearchKind,
    target: char,
    count: u32,
) -> Option<MotionData> {
    let info = snapshot.line(request.start.line)?;
    let line: Vec<char> = snapshot.line_text(request.start.line)?.chars().collect();
    let col = request.start.column;
    match kind {
        CharSearchKind::ToChar | CharSearchKind::TillChar => {
            let mut found = col;
            let mut remaining = count;
            for (i, &c) in line.iter().enumerate().skip(col + 1) {
                if c == target {
                    remaining -= 1;
                    if remaining == 0 {
                        found = i;
                        break;
                    }
                }
            }
            if remaining != 0 {
                return None;
            }
            let end_col = match kind {
                CharSearchKind::ToChar => found + 1,
                _ => found,
            };
            if end_col <= col {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(info.start + col, info.start + end_col),
                true,
                Inclusion::Inclusive,
            ))
        }
        CharSearchKind::BackToChar | CharSearchKind::BackTillChar => {
            let mut found = None;
            let mut remaining = count;
            for i in (0..col.min(line.len())).rev() {
                if line[i] == target {
                    remaining -= 1;
                    if remaining == 0 {
                        found = Some(i);
                        break;
                    }
                }
            }
            let found = found?;
            let start_col = match kind {
                CharSearchKind::BackToChar => found,
                _ => found + 1,
            };
            if start_col >= col {
                return None;
            }
            Some(char_motion(
                Span::from_bounds(info.start + start_col, info.start + col),
                false,
                Inclusion::Exclusive,
            ))
        }
    }
}

/// Column of the first non-blank character (line length if all blank).
pub fn first_non_blank_column(line: &str) -> usize {
    line.chars()
        .position(|c| !charutil::is_blank(c))
        .unwrap_or_else(|| line.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(lines: &[&str]) -> BufferSnapshot {
        BufferSnapshot::from_lines(lines)
    }

    fn run(snapshot: &BufferSnapshot, request: MotionRequest) -> MotionData {
        evaluate(snapshot, &request).expect("motion should produce data")
    }

    #[test]
    fn char_right_is_exclusive() {
        let s = snap(&["cat dog"]);
        let data = run(&s, MotionRequest::new(MotionKind::CharRight, Point::new(0, 0)));
        assert_eq!(data.span, Span::new(0, 1));
        assert_eq!(data.inclusion, Inclusion::Exclusive);
        assert_eq!(data.kind, OperationKind::CharacterWise);
        assert_eq!(data.caret_offset(), 1);
    }

    #[test]
    fn char_right_clamps_at_line_end() {
        let s = snap(&["ab"]);
        let req = MotionRequest::new(MotionKind::CharRight, Point::new(0, 1)).with_count(9);
        let data = run(&s, req);
        assert_eq!(data.span.end(), 2);
        // Already at the clamp point: no motion at all.
        assert!(evaluate(&s, &MotionRequest::new(MotionKind::CharRight, Point::new(0, 2))).is_none());
    }

    #[test]
    fn char_left_spans_backward() {
        let s = snap(&["cat"]);
        let data = run(&s, MotionRequest::new(MotionKind::CharLeft, Point::new(0, 2)));
        assert_eq!(data.span, Span::new(1, 1));
        assert!(!data.is_forward);
        assert_eq!(data.caret_offset(), 1);
    }

    #[test]
    fn line_down_is_linewise_with_sticky_column() {
        let s = snap(&["cat", "dogs", "fish"]);
        let req = MotionRequest::new(MotionKind::LineDown, Point::new(0, 2)).with_count(2);
        let data = run(&s, req);
        assert_eq!(data.kind, OperationKind::LineWise);
        assert_eq!(data.explicit_column, Some(2));
        // Full lines 0..=2 including the final line content.
        assert_eq!(data.span.start, 0);
        assert_eq!(data.span.end(), s.char_count());
    }

    #[test]
    fn line_up_at_top_reports_none() {
        let s = snap(&["cat", "dog"]);
        assert!(evaluate(&s, &MotionRequest::new(MotionKind::LineUp, Point::new(0, 0))).is_none());
    }

    #[test]
    fn column_or_first_point_rule() {
        let s = snap(&["cat", "dogs"]);
        // Without an explicit column: start of span.
        let word = run(&s, MotionRequest::new(MotionKind::WordForward { big: false }, Point::new(0, 0)));
        assert_eq!(word.column_or_first_point(&s), Some(Point::new(0, 0)));
        // With one (vertical motion): end of span.
        let down = run(&s, MotionRequest::new(MotionKind::LineDown, Point::new(0, 1)));
        assert_eq!(down.column_or_first_point(&s), s.point_of(down.span.end()));
    }

    #[test]
    fn line_end_is_inclusive() {
        let s = snap(&["cat dog"]);
        let data = run(&s, MotionRequest::new(MotionKind::LineEnd, Point::new(0, 2)));
        assert_eq!(data.span, Span::from_bounds(2, 7));
        assert_eq!(data.inclusion, Inclusion::Inclusive);
        assert_eq!(data.caret_offset(), 6);
    }

    #[test]
    fn first_non_blank_sets_flag() {
        let s = snap(&["   cat"]);
        let data = run(&s, MotionRequest::new(MotionKind::FirstNonBlank, Point::new(0, 5)));
        assert!(data.move_to_first_non_blank);
        assert_eq!(data.span.start, 3);
    }

    #[test]
    fn goto_line_defaults() {
        let s = snap(&["a", "b", "c"]);
        let last = run(&s, MotionRequest::new(MotionKind::GotoLine { default_last: true }, Point::new(0, 0)));
        assert_eq!(last.kind, OperationKind::LineWise);
        assert_eq!(last.span.end(), s.char_count());
        let counted = run(
            &s,
            MotionRequest::new(MotionKind::GotoLine { default_last: true }, Point::new(0, 0)).with_count(2),
        );
        assert_eq!(s.point_of(counted.span.end() - 1).unwrap().line, 1);
    }

    #[test]
    fn end_of_word_is_inclusive() {
        let s = snap(&["cat dog"]);
        let data = run(&s, MotionRequest::new(MotionKind::EndOfWord { big: false }, Point::new(0, 0)));
        assert_eq!(data.span, Span::from_bounds(0, 3));
        assert_eq!(data.inclusion, Inclusion::Inclusive);
        assert_eq!(data.caret_offset(), 2);
    }

    #[test]
    fn find_char_inclusive_and_till() {
        let s = snap(&["cat dog cat"]);
        let f = run(
            &s,
            MotionRequest::new(
                MotionKind::CharSearch {
                    kind: CharSearchKind::ToChar,
                    target: 'o',
                },
                Point::new(0, 0),
            ),
        );
        assert_eq!(f.span, Span::from_bounds(0, 6));
        assert_eq!(f.inclusion, Inclusion::Inclusive);
        let t = run(
            &s,
            MotionRequest::new(
                MotionKind::CharSearch {
                    kind: CharSearchKind::TillChar,
                    target: 'o',
                },
                Point::new(0, 0),
            ),
        );
        assert_eq!(t.span, Span::from_bounds(0, 5));
    }

    #[test]
    fn find_char_with_count_and_miss() {
        let s = snap(&["cat cat cat"]);
        let second = run(
            &s,
            MotionRequest::new(
                MotionKind::CharSearch {
                    kind: CharSearchKind::ToChar,
                    target: 'c',
                },
                Point::new(0, 0),
            )
            .with_count(2),
        );
        assert_eq!(second.span.end(), 9);
        let miss = MotionRequest::new(
            MotionKind::CharSearch {
                kind: CharSearchKind::ToChar,
                target: 'z',
            },
            Point::new(0, 0),
        );
        assert!(evaluate(&s, &miss).is_none());
    }

    #[test]
    fn backward_char_search() {
        let s = snap(&["cat dog"]);
        let back = run(
            &s,
            MotionRequest::new(
                MotionKind::CharSearch {
                    kind: CharSearchKind::BackToChar,
                    target: 'a',
                },
                Point::new(0, 5),
            ),
        );
        assert_eq!(back.span, Span::from_bounds(1, 5));
        assert!(!back.is_forward);
    }

    #[test]
    fn search_pattern_motion_runs_to_match_start() {
        let s = snap(&["cat dog", "dog cat"]);
        let data = run(
            &s,
            MotionRequest::new(
                MotionKind::SearchPattern {
                    pattern: "dog".into(),
                    path: SearchPath::Forward,
                },
                Point::new(0, 0),
            ),
        );
        assert_eq!(data.span, Span::from_bounds(0, 4));
        assert_eq!(data.inclusion, Inclusion::Exclusive);
    }
}
