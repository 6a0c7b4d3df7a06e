//! Word, sentence and paragraph scanning.
//!
//! Forward scans walk a [`CharStream`] so the cursor-relative remainder of
//! the buffer can be measured and re-read without disturbing the scan;
//! backward scans index characters directly. Line breaks count as blanks
//! for word-crossing purposes.

use vix_text::{BufferSnapshot, CharStream, TextSnapshot, charutil};

/// Character class as seen by word motions. For WORD (`big`) motions every
/// non-blank belongs to one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotionClass {
    Blank,
    Word,
    Punctuation,
}

fn class_of(c: char, big: bool) -> MotionClass {
    if c == '\n' || c == '\r' || charutil::is_blank(c) {
        MotionClass::Blank
    } else if big {
        MotionClass::Word
    } else {
        match charutil::char_class(c) {
            charutil::CharClass::Word => MotionClass::Word,
            charutil::CharClass::Punctuation => MotionClass::Punctuation,
            charutil::CharClass::Blank => MotionClass::Blank,
        }
    }
}

/// Advance the stream while its head satisfies `pred`, returning the
/// remainder.
fn skip_while(stream: CharStream, pred: impl Fn(char) -> bool) -> CharStream {
    let mut run = 0;
    for c in stream.chars() {
        if !pred(c) {
            break;
        }
        run += 1;
    }
    stream.skip(run)
}

/// Offset of the start of the `count`'th next word. Clamps at the end of
/// the buffer.
pub fn word_forward(snapshot: &BufferSnapshot, offset: usize, big: bool, count: u32) -> usize {
    let mut stream = CharStream::from_snapshot(snapshot, offset);
    for _ in 0..count {
        let Some(head) = stream.head() else { break };
        let class = class_of(head, big);
        if class != MotionClass::Blank {
            stream = skip_while(stream, |c| class_of(c, big) == class);
        }
        stream = skip_while(stream, |c| class_of(c, big) == MotionClass::Blank);
    }
    stream.offset()
}

/// Offset of the start of the `count`'th previous word. Clamps at 0.
pub fn word_backward(snapshot: &BufferSnapshot, offset: usize, big: bool, count: u32) -> usize {
    let char_at = |i: usize| snapshot.char_at(i);
    let mut pos = offset;
    for _ in 0..count {
        if pos == 0 {
            break;
        }
        pos -= 1;
        // Skip blanks (and line breaks) backward.
        while pos > 0 && matches!(char_at(pos), Some(c) if class_of(c, big) == MotionClass::Blank) {
            pos -= 1;
        }
        // Walk to the start of the class run the cursor now sits in.
        if let Some(c) = char_at(pos) {
            let class = class_of(c, big);
            if class == MotionClass::Blank {
                continue;
            }
            while pos > 0 {
                match char_at(pos - 1) {
                    Some(prev) if class_of(prev, big) == class => pos -= 1,
                    _ => break,
                }
            }
        }
    }
    pos
}

/// Offset of the last character of the `count`'th next word end, or `None`
/// when no further word end exists.
pub fn end_of_word(snapshot: &BufferSnapshot, offset: usize, big: bool, count: u32) -> Option<usize> {
    let mut pos = offset;
    let total = snapshot.char_count();
    for _ in 0..count {
        // Always make progress off the current position.
        pos += 1;
        // Skip separators to the next word body.
        while pos < total {
            match snapshot.char_at(pos) {
                Some(c) if class_of(c, big) == MotionClass::Blank => pos += 1,
                _ => break,
            }
        }
        if pos >= total {
            return None;
        }
        let class = class_of(snapshot.char_at(pos)?, big);
        while pos + 1 < total {
            match snapshot.char_at(pos + 1) {
                Some(next) if class_of(next, big) == class => pos += 1,
                _ => break,
            }
        }
    }
    Some(pos)
}

/// Sentence terminators: `. ! ?` followed by a blank or line break (or the
/// end of the buffer), optionally with closing quotes/brackets between.
fn is_sentence_end(snapshot: &BufferSnapshot, offset: usize) -> bool {
    let Some(c) = snapshot.char_at(offset) else {
        return false;
    };
    if !matches!(c, '.' | '!' | '?') {
        return false;
    }
    let mut next = offset + 1;
    while let Some(follow) = snapshot.char_at(next) {
        match follow {
            ')' | ']' | '"' | '\'' => next += 1,
            ' ' | '\t' | '\n' | '\r' => return true,
            _ => return false,
        }
    }
    true
}

/// Offset of the start of the `count`'th next sentence; clamps to the end
/// of the buffer.
pub fn sentence_forward(snapshot: &BufferSnapshot, offset: usize, count: u32) -> usize {
    let total = snapshot.char_count();
    let mut pos = offset;
    for _ in 0..count {
        let mut next = None;
        let mut i = pos;
        while i < total {
            if is_sentence_end(snapshot, i) {
                // Step past the terminator and trailing blanks to the start
                // of the following sentence.
                let mut j = i + 1;
                while matches!(
                    snapshot.char_at(j),
                    Some(')' | ']' | '"' | '\'' | ' ' | '\t' | '\n' | '\r')
                ) {
                    j += 1;
                }
                if j > pos {
                    next = Some(j.min(total));
                    break;
                }
            }
            i += 1;
        }
        pos = next.unwrap_or(total);
    }
    pos
}

/// Offset of the start of the current (or `count`'th previous) sentence.
pub fn sentence_backward(snapshot: &BufferSnapshot, offset: usize, count: u32) -> usize {
    let mut pos = offset;
    for _ in 0..count {
        if pos == 0 {
            break;
        }
        // Candidate sentence starts strictly before `pos`.
        let mut candidate = 0;
        let mut i = 0;
        while i + 1 < pos {
            if is_sentence_end(snapshot, i) {
                let mut j = i + 1;
                while matches!(
                    snapshot.char_at(j),
                    Some(')' | ']' | '"' | '\'' | ' ' | '\t' | '\n' | '\r')
                ) {
                    j += 1;
                }
                if j < pos {
                    candidate = j;
                }
            }
            i += 1;
        }
        pos = candidate;
    }
    pos
}

fn line_is_blank(snapshot: &BufferSnapshot, line: usize) -> bool {
    snapshot
        .line_text(line)
        .is_some_and(|text| text.chars().all(charutil::is_blank))
}

/// Line number of the `count`'th next paragraph boundary. Every blank line
/// is a boundary; past the final one the motion clamps to the last line.
pub fn paragraph_forward(snapshot: &BufferSnapshot, line: usize, count: u32) -> usize {
    let last = snapshot.line_count() - 1;
    let mut current = line;
    for _ in 0..count {
        while current < last {
            current += 1;
            if line_is_blank(snapshot, current) {
                break;
            }
        }
        if current == last {
            break;
        }
    }
    current
}

/// Line number of the `count`'th previous paragraph boundary; clamps to the
/// first line.
pub fn paragraph_backward(snapshot: &BufferSnapshot, line: usize, count: u32) -> usize {
    let mut current = line;
    for _ in 0..count {
        while current > 0 {
            current -= 1;
            if line_is_blank(snapshot, current) {
                break;
            }
        }
        if current == 0 {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(text: &str) -> BufferSnapshot {
        BufferSnapshot::from_text(text)
    }

    #[test]
    fn word_forward_steps_words_and_punctuation() {
        let s = snap("foo, bar baz");
        assert_eq!(word_forward(&s, 0, false, 1), 3); // onto the comma
        assert_eq!(word_forward(&s, 3, false, 1), 5); // onto bar
        assert_eq!(word_forward(&s, 0, false, 2), 5);
        // WORD motion treats "foo," as one chunk.
        assert_eq!(word_forward(&s, 0, true, 1), 5);
    }

    #[test]
    fn word_forward_crosses_lines_and_clamps() {
        let s = snap("foo\nbar");
        assert_eq!(word_forward(&s, 0, false, 1), 4);
        assert_eq!(word_forward(&s, 4, false, 5), 7); // clamp at end
    }

    #[test]
    fn word_backward_finds_word_starts() {
        let s = snap("foo, bar baz");
        assert_eq!(word_backward(&s, 9, false, 1), 5);
        assert_eq!(word_backward(&s, 5, false, 1), 3);
        assert_eq!(word_backward(&s, 5, true, 1), 0);
        assert_eq!(word_backward(&s, 2, false, 9), 0);
    }

    #[test]
    fn end_of_word_lands_on_final_char() {
        let s = snap("cat dog");
        assert_eq!(end_of_word(&s, 0, false, 1), Some(2));
        assert_eq!(end_of_word(&s, 2, false, 1), Some(6));
        assert_eq!(end_of_word(&s, 0, false, 2), Some(6));
        assert_eq!(end_of_word(&s, 6, false, 1), None);
    }

    #[test]
    fn sentences_split_on_terminators() {
        let s = snap("One two. Three four! Five");
        assert_eq!(sentence_forward(&s, 0, 1), 9);
        assert_eq!(sentence_forward(&s, 9, 1), 21);
        assert_eq!(sentence_forward(&s, 0, 2), 21);
        // Past the last terminator: clamps to end.
        assert_eq!(sentence_forward(&s, 21, 1), s.char_count());
        assert_eq!(sentence_backward(&s, 21, 1), 9);
        assert_eq!(sentence_backward(&s, 9, 1), 0);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let s = snap("alpha\nbeta\n\ngamma\n\n\ndelta");
        assert_eq!(paragraph_forward(&s, 0, 1), 2);
        assert_eq!(paragraph_forward(&s, 2, 1), 4);
        assert_eq!(paragraph_forward(&s, 0, 9), s.line_count() - 1);
        assert_eq!(paragraph_backward(&s, 6, 1), 5);
        assert_eq!(paragraph_backward(&s, 5, 1), 4);
        assert_eq!(paragraph_backward(&s, 4, 1), 2);
        assert_eq!(paragraph_backward(&s, 2, 3), 0);
    }
}
