//! Insert and Replace mode processing.
//!
//! Both modes share one processor; Replace differs only in overwriting the
//! character under the caret instead of pushing it right. Every edit is
//! recorded into the change tracker so the repeat command can replay the
//! whole mode visit.

use crate::mode::{Mode, ProcessResult};
use crate::VimEngine;
use vix_keys::KeyInput;
use vix_text::{Point, Span, TextSnapshot};

impl VimEngine {
    pub(crate) fn process_insert(&mut self, key: KeyInput) -> ProcessResult {
        if key.is_escape() {
            // Vim steps the caret back onto the last typed character.
            if self.caret.column > 0 {
                self.caret.column -= 1;
            }
            return ProcessResult::SwitchMode(Mode::Normal);
        }
        let snapshot = self.snapshot();
        let Some(offset) = snapshot.offset_of(self.caret) else {
            return ProcessResult::Processed;
        };
        if key.is_enter() {
            if self.edit(Span::new(offset, 0), "\n").is_some() {
                self.changes.record_insert("\n");
                self.caret = Point::new(self.caret.line + 1, 0);
            }
            return ProcessResult::Processed;
        }
        if key.is_backspace() {
            if offset == 0 {
                return ProcessResult::Processed;
            }
            let target = snapshot.point_of(offset - 1).unwrap_or_default();
            if self.edit(Span::new(offset - 1, 1), "").is_some() {
                self.changes.record_delete_left(1);
                self.caret = target;
            }
            return ProcessResult::Processed;
        }
        if let Some(typed) = key.character() {
            let overwrite = self.mode == Mode::Replace
                && snapshot
                    .line(self.caret.line)
                    .is_some_and(|info| self.caret.column < info.length);
            let span = if overwrite {
                Span::new(offset, 1)
            } else {
                Span::new(offset, 0)
            };
            let text = typed.to_string();
            if self.edit(span, &text).is_some() {
                self.changes.record_insert(&text);
                self.caret.column += 1;
            }
            return ProcessResult::Processed;
        }
        ProcessResult::Unhandled
    }
}
