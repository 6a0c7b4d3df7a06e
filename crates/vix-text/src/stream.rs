//! A re-enumerable forward character stream over a snapshot.
//!
//! Word and search motions peel characters off the front of the buffer
//! starting at the cursor. The stream is a value: `skip(n)` returns a new
//! stream rather than consuming this one, and `len()` reports the same
//! remaining count on every read. That stability matters because motion
//! evaluation may measure a stream, back off, and measure it again.

use crate::{BufferSnapshot, TextSnapshot};
use ropey::Rope;

#[derive(Debug, Clone)]
pub struct CharStream {
    rope: Rope,
    start: usize,
}

impl CharStream {
    /// Stream over all characters of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            start: 0,
        }
    }

    /// Stream starting at an absolute offset of a snapshot. Offsets past the
    /// end clamp to an empty stream.
    pub fn from_snapshot(snapshot: &BufferSnapshot, offset: usize) -> Self {
        Self {
            rope: snapshot.rope().clone(),
            start: offset.min(snapshot.char_count()),
        }
    }

    /// Remaining character count. Stable across repeated calls.
    pub fn len(&self) -> usize {
        self.rope.len_chars() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new stream with the first `n` characters skipped; skipping past the
    /// end yields an empty stream, never an error.
    pub fn skip(&self, n: usize) -> Self {
        Self {
            rope: self.rope.clone(),
            start: (self.start + n).min(self.rope.len_chars()),
        }
    }

    /// First remaining character, if any.
    pub fn head(&self) -> Option<char> {
        if self.start < self.rope.len_chars() {
            Some(self.rope.char(self.start))
        } else {
            None
        }
    }

    /// Iterate the remaining characters without consuming the stream.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars_at(self.start)
    }

    /// Absolute offset of the stream head in the underlying snapshot.
    pub fn offset(&self) -> usize {
        self.start
    }
}
