//! The editable buffer behind the engine.
//!
//! All mutation funnels through [`EditableBuffer::replace`]: it validates
//! the span, rewrites the rope, recomputes tracked positions, and then
//! notifies subscribers synchronously with the new snapshot. Snapshots are
//! immutable values; holding one across later edits is always safe.

use crate::tracking::{CloseFn, LineEdit, TrackingHandle, TrackingTable};
use ropey::Rope;
use thiserror::Error;
use tracing::debug;
use vix_text::{BufferSnapshot, Point, Span, TextSnapshot};

/// Hard failures from buffer operations. These indicate orchestration bugs
/// (not user input) and are propagated, never swallowed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("a session is already attached to this buffer")]
    SessionExists,
    #[error("edit span [{start}, {end}) exceeds buffer length {len}")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// What subscribers learn about one edit: the replaced span (pre-edit
/// coordinates), the replacement length, and the post-edit snapshot.
#[derive(Debug, Clone)]
pub struct EditNotice {
    pub old_span: Span,
    pub new_text_len: usize,
    pub snapshot: BufferSnapshot,
}

/// Identity of one edit subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&EditNotice)>;

/// Mutable text buffer with edit notifications and position tracking.
pub struct EditableBuffer {
    rope: Rope,
    tracking: TrackingTable,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    session_attached: bool,
}

impl std::fmt::Debug for EditableBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableBuffer")
            .field("chars", &self.rope.len_chars())
            .field("lines", &self.rope.len_lines())
            .field("listeners", &self.listeners.len())
            .field("tracked", &self.tracking.live_count())
            .finish()
    }
}

impl EditableBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            tracking: TrackingTable::default(),
            listeners: Vec::new(),
            next_listener: 0,
            session_attached: false,
        }
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Self::from_text(&lines.join("\n"))
    }

    /// Point-in-time view of the current text.
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot::from_rope(self.rope.clone())
    }

    /// Attach the single editing session. A second attach is a programming
    /// error in the orchestrating layer.
    pub fn attach_session(&mut self) -> Result<(), BufferError> {
        if self.session_attached {
            return Err(BufferError::SessionExists);
        }
        self.session_attached = true;
        Ok(())
    }

    pub fn detach_session(&mut self) {
        self.session_attached = false;
    }

    /// Subscribe to edit notifications; the callback runs synchronously
    /// after every successful `replace`.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    /// Replace `span` with `text`, producing the post-edit snapshot.
    /// Tracked positions are recomputed before any listener runs, so a
    /// listener resolving a mark observes the new coordinates.
    pub fn replace(&mut self, span: Span, text: &str) -> Result<BufferSnapshot, BufferError> {
        let len = self.rope.len_chars();
        if span.end() > len {
            return Err(BufferError::SpanOutOfBounds {
                start: span.start,
                end: span.end(),
                len,
            });
        }

        let before = self.snapshot();
        let first_line = before
            .point_of(span.start)
            .map(|p| p.line)
            .unwrap_or_default();
        let last_line = before
            .point_of(span.end())
            .map(|p| p.line)
            .unwrap_or_default();

        self.rope.remove(span.start..span.end());
        self.rope.insert(span.start, text);

        let inserted_breaks = text.matches('\n').count();
        let removes_first_line = last_line > first_line
            && before
                .line(first_line)
                .is_some_and(|info| span.start == info.start);
        self.tracking.apply_edit(LineEdit {
            first_line,
            last_line,
            inserted_breaks,
            removes_first_line,
        });

        let snapshot = self.snapshot();
        debug!(
            target: "state.buffer",
            start = span.start,
            removed = span.length,
            inserted = text.chars().count(),
            "replace"
        );
        let notice = EditNotice {
            old_span: span,
            new_text_len: text.chars().count(),
            snapshot: snapshot.clone(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&notice);
        }
        Ok(snapshot)
    }

    /// Convenience: insert at an offset.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<BufferSnapshot, BufferError> {
        self.replace(Span::new(offset, 0), text)
    }

    /// Convenience: delete a span.
    pub fn delete(&mut self, span: Span) -> Result<BufferSnapshot, BufferError> {
        self.replace(span, "")
    }

    // ---- position tracking ------------------------------------------------

    pub fn create_tracking(
        &mut self,
        line: usize,
        column: usize,
        on_close: CloseFn,
    ) -> TrackingHandle {
        self.tracking.create(line, column, on_close)
    }

    pub fn resolve_tracking(&self, handle: TrackingHandle) -> Option<Point> {
        let point = self.tracking.resolve(handle)?;
        // Clamp the stored column to the line's current content.
        let snapshot = self.snapshot();
        let info = snapshot.line(point.line)?;
        Some(Point::new(point.line, point.column.min(info.length)))
    }

    pub fn release_tracking(&mut self, handle: TrackingHandle) {
        self.tracking.release(handle);
    }
}
