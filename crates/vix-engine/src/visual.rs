//! Visual mode processing.
//!
//! The selection is implicit: an anchor captured on entry plus the live
//! caret. Character selections are inclusive of both endpoints, line
//! selections cover whole lines, and block selections are rectangular in
//! (line, column) space. Operators act on the selection immediately and drop
//! back to Normal (or Insert, for a change).

use crate::mode::{Mode, ProcessResult};
use crate::normal::{KeyLookup, NormalAction, Operator};
use crate::{VimEngine, clamp_column};
use vix_keys::KeyInput;
use vix_registers::RegisterValue;
use vix_text::{BlockSpan, BufferSnapshot, OperationKind, Point, Span, TextSnapshot, charutil};

/// What the current anchor/caret pair selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VisualSelection {
    Region(Span, OperationKind),
    Block(BlockSpan),
}

impl VimEngine {
    pub(crate) fn process_visual(&mut self, key: KeyInput) -> ProcessResult {
        if self.pending.awaiting_register {
            return self.handle_register_key(key);
        }
        if let Some(waiting) = self.pending.awaiting_char.take() {
            return self.finish_char_arg(waiting, key);
        }
        if key.is_escape() {
            self.reset_pending();
            return ProcessResult::SwitchMode(Mode::Normal);
        }
        match self.lookup_key(key) {
            KeyLookup::Pending => ProcessResult::Processed,
            KeyLookup::Action(action) => self.run_visual_action(action),
            KeyLookup::Unknown { .. } => {
                self.reset_pending();
                ProcessResult::Processed
            }
        }
    }

    fn run_visual_action(&mut self, action: NormalAction) -> ProcessResult {
        use NormalAction as A;
        match action {
            A::Motion(token) => self.apply_pure_motion(token.kind(), token.is_vertical()),
            A::BeginFind(kind) => {
                self.pending.awaiting_char = Some(crate::normal::CharPending::Find(kind));
                ProcessResult::Processed
            }
            A::Operator(Operator::Delete) | A::DeleteCharRight => self.visual_delete(false),
            A::Operator(Operator::Change) => self.visual_delete(true),
            A::Operator(Operator::Yank) => self.visual_yank(),
            A::Operator(Operator::Rot13) => self.visual_rot13(),
            // `o` exchanges the caret with the anchor.
            A::OpenBelow => {
                if let Some(anchor) = self.visual_anchor {
                    self.visual_anchor = Some(self.caret);
                    self.caret = anchor;
                }
                ProcessResult::Processed
            }
            A::VisualChar => self.toggle_visual(Mode::VisualCharacter),
            A::VisualLine => self.toggle_visual(Mode::VisualLine),
            A::VisualBlock => self.toggle_visual(Mode::VisualBlock),
            A::SelectRegister => {
                self.pending.awaiting_register = true;
                ProcessResult::Processed
            }
            _ => {
                self.reset_pending();
                ProcessResult::Processed
            }
        }
    }

    fn toggle_visual(&mut self, target: Mode) -> ProcessResult {
        self.reset_pending();
        if self.mode == target {
            ProcessResult::SwitchMode(Mode::Normal)
        } else {
            ProcessResult::SwitchMode(target)
        }
    }

    pub(crate) fn visual_selection(&self, snapshot: &BufferSnapshot) -> Option<VisualSelection> {
        let anchor = self.visual_anchor.unwrap_or(self.caret);
        match self.mode {
            Mode::VisualCharacter => {
                let a = snapshot.offset_of(anchor)?;
                let c = snapshot.offset_of(self.caret)?;
                let (low, high) = if a <= c { (a, c) } else { (c, a) };
                let end = (high + 1).min(snapshot.char_count());
                Some(VisualSelection::Region(
                    Span::from_bounds(low, end),
                    OperationKind::CharacterWise,
                ))
            }
            Mode::VisualLine => {
                let first = anchor.line.min(self.caret.line);
                let last = anchor.line.max(self.caret.line);
                let first_info = snapshot.line(first)?;
                let last_info = snapshot.line(last)?;
                Some(VisualSelection::Region(
                    Span::from_bounds(first_info.start, last_info.end_including_break()),
                    OperationKind::LineWise,
                ))
            }
            Mode::VisualBlock => {
                let first = anchor.line.min(self.caret.line);
                let height = anchor.line.abs_diff(self.caret.line) + 1;
                let left = anchor.column.min(self.caret.column);
                let width = anchor.column.abs_diff(self.caret.column) + 1;
                Some(VisualSelection::Block(BlockSpan::new(
                    Point::new(first, left),
                    width,
                    height,
                )))
            }
            _ => None,
        }
    }

    fn visual_delete(&mut self, change: bool) -> ProcessResult {
        let snapshot = self.snapshot();
        let Some(selection) = self.visual_selection(&snapshot) else {
            self.reset_pending();
            return ProcessResult::SwitchMode(Mode::Normal);
        };
        let register = self.pending.register;
        match selection {
            VisualSelection::Region(span, kind) => {
                let text = snapshot.slice(span);
                if self.edit(span, "").is_some() {
                    self.registers
                        .record_delete(RegisterValue::of_text(text, kind), register);
                    if change && kind == OperationKind::LineWise {
                        self.reopen_changed_line(span.start);
                    } else if change {
                        let after = self.snapshot();
                        self.caret = after
                            .point_of(span.start.min(after.char_count()))
                            .unwrap_or_default();
                    } else {
                        self.caret_after_removal(span, kind);
                    }
                }
            }
            VisualSelection::Block(block) => {
                let chunks = block.line_slices(&snapshot);
                self.delete_block(&snapshot, block);
                self.registers
                    .record_delete(RegisterValue::of_block(chunks), register);
                let after = self.snapshot();
                let column = if change {
                    block.start.column.min(
                        after
                            .line(block.start.line)
                            .map(|info| info.length)
                            .unwrap_or(0),
                    )
                } else {
                    clamp_column(&after, block.start.line, block.start.column)
                };
                self.caret = Point::new(block.start.line, column);
            }
        }
        self.reset_pending();
        if change {
            ProcessResult::SwitchMode(Mode::Insert)
        } else {
            ProcessResult::SwitchMode(Mode::Normal)
        }
    }

    /// Remove the block's per-line slices, bottom row first so offsets of the
    /// rows still to delete stay valid against the original snapshot.
    fn delete_block(&mut self, snapshot: &BufferSnapshot, block: BlockSpan) {
        for row in (0..block.height).rev() {
            let line = block.start.line + row;
            let Some(info) = snapshot.line(line) else {
                continue;
            };
            let left = block.start.column.min(info.length);
            let right = (block.start.column + block.width).min(info.length);
            if left < right {
                let _ = self.edit(Span::from_bounds(info.start + left, info.start + right), "");
            }
        }
    }

    fn visual_yank(&mut self) -> ProcessResult {
        let snapshot = self.snapshot();
        let register = self.pending.register;
        if let Some(selection) = self.visual_selection(&snapshot) {
            match selection {
                VisualSelection::Region(span, kind) => {
                    let text = snapshot.slice(span);
                    self.registers
                        .record_yank(RegisterValue::of_text(text, kind), register);
                    let point = snapshot.point_of(span.start).unwrap_or(self.caret);
                    let column = if kind == OperationKind::LineWise {
                        self.caret.column
                    } else {
                        point.column
                    };
                    self.caret =
                        Point::new(point.line, clamp_column(&snapshot, point.line, column));
                }
                VisualSelection::Block(block) => {
                    self.registers
                        .record_yank(RegisterValue::of_block(block.line_slices(&snapshot)), register);
                    self.caret = Point::new(
                        block.start.line,
                        clamp_column(&snapshot, block.start.line, block.start.column),
                    );
                }
            }
        }
        self.reset_pending();
        ProcessResult::SwitchMode(Mode::Normal)
    }

    fn visual_rot13(&mut self) -> ProcessResult {
        let snapshot = self.snapshot();
        if let Some(selection) = self.visual_selection(&snapshot) {
            match selection {
                VisualSelection::Region(span, _) => {
                    let rotated: String =
                        snapshot.slice(span).chars().map(charutil::rot13).collect();
                    let _ = self.edit(span, &rotated);
                    let after = self.snapshot();
                    let point = after.point_of(span.start).unwrap_or(self.caret);
                    self.caret =
                        Point::new(point.line, clamp_column(&after, point.line, point.column));
                }
                VisualSelection::Block(block) => {
                    for row in (0..block.height).rev() {
                        let line = block.start.line + row;
                        let Some(info) = snapshot.line(line) else {
                            continue;
                        };
                        let left = block.start.column.min(info.length);
                        let right = (block.start.column + block.width).min(info.length);
                        if left < right {
                            let span =
                                Span::from_bounds(info.start + left, info.start + right);
                            let rotated: String =
                                snapshot.slice(span).chars().map(charutil::rot13).collect();
                            let _ = self.edit(span, &rotated);
                        }
                    }
                    let after = self.snapshot();
                    self.caret = Point::new(
                        block.start.line,
                        clamp_column(&after, block.start.line, block.start.column),
                    );
                }
            }
        }
        self.reset_pending();
        ProcessResult::SwitchMode(Mode::Normal)
    }
}
