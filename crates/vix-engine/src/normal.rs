//! Normal-mode key processing.
//!
//! Keys flow through three stages: count capture, command-name resolution
//! against the registered table, and action execution. Operators (`d`, `c`,
//! `y`, `g?`) stay pending until a motion arrives; a doubled operator key
//! acts on whole lines. Counts typed before and after an operator multiply.

use crate::mode::{Mode, ProcessResult};
use crate::{VimEngine, clamp_column};
use tracing::debug;
use vix_keymap::{CommandName, CommandTable, CountCapture, CountResult, MatchResult};
use vix_keys::KeyInput;
use vix_motion::{CharSearchKind, MotionKind, MotionRequest, SearchPath, first_non_blank_column};
use vix_registers::{RegisterContent, RegisterName, RegisterValue};
use vix_text::{OperationKind, Point, Span, TextSnapshot, charutil};

/// Payload-free identities for the motion commands, mapped to the motion
/// grammar at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MotionToken {
    CharLeft,
    CharRight,
    LineUp,
    LineDown,
    LineStart,
    FirstNonBlank,
    LineEnd,
    GotoLine,
    GotoFirstLine,
    WordForward { big: bool },
    WordBackward { big: bool },
    EndOfWord { big: bool },
    SentenceForward,
    SentenceBackward,
    ParagraphForward,
    ParagraphBackward,
}

impl MotionToken {
    pub(crate) fn kind(self) -> MotionKind {
        match self {
            Self::CharLeft => MotionKind::CharLeft,
            Self::CharRight => MotionKind::CharRight,
            Self::LineUp => MotionKind::LineUp,
            Self::LineDown => MotionKind::LineDown,
            Self::LineStart => MotionKind::LineStart,
            Self::FirstNonBlank => MotionKind::FirstNonBlank,
            Self::LineEnd => MotionKind::LineEnd,
            Self::GotoLine => MotionKind::GotoLine { default_last: true },
            Self::GotoFirstLine => MotionKind::GotoLine {
                default_last: false,
            },
            Self::WordForward { big } => MotionKind::WordForward { big },
            Self::WordBackward { big } => MotionKind::WordBackward { big },
            Self::EndOfWord { big } => MotionKind::EndOfWord { big },
            Self::SentenceForward => MotionKind::SentenceForward,
            Self::SentenceBackward => MotionKind::SentenceBackward,
            Self::ParagraphForward => MotionKind::ParagraphForward,
            Self::ParagraphBackward => MotionKind::ParagraphBackward,
        }
    }

    /// Vertical motions carry the sticky column.
    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Self::LineUp | Self::LineDown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Delete,
    Change,
    Yank,
    Rot13,
}

/// A command waiting for one more character argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharPending {
    Find(CharSearchKind),
    ReplaceChar,
    SetMark,
    JumpMark { line_start: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Motion(MotionToken),
    BeginFind(CharSearchKind),
    Operator(Operator),
    DeleteCharRight,
    DeleteCharLeft,
    DeleteToEnd,
    ChangeToEnd,
    PasteAfter,
    PasteBefore,
    BeginReplaceChar,
    InsertBefore,
    InsertAfter,
    InsertLineStart,
    InsertLineEnd,
    OpenBelow,
    OpenAbove,
    EnterReplace,
    VisualChar,
    VisualLine,
    VisualBlock,
    BeginSetMark,
    BeginJumpMark { line_start: bool },
    RepeatChange,
    CommandLine(char),
    SelectRegister,
    SearchNext,
    SearchPrev,
}

/// The built-in Normal-mode grammar.
pub(crate) fn command_table() -> CommandTable<NormalAction> {
    use MotionToken as M;
    use NormalAction as A;
    let entries: &[(&str, A)] = &[
        ("h", A::Motion(M::CharLeft)),
        ("l", A::Motion(M::CharRight)),
        ("k", A::Motion(M::LineUp)),
        ("j", A::Motion(M::LineDown)),
        ("0", A::Motion(M::LineStart)),
        ("^", A::Motion(M::FirstNonBlank)),
        ("$", A::Motion(M::LineEnd)),
        ("G", A::Motion(M::GotoLine)),
        ("gg", A::Motion(M::GotoFirstLine)),
        ("w", A::Motion(M::WordForward { big: false })),
        ("W", A::Motion(M::WordForward { big: true })),
        ("b", A::Motion(M::WordBackward { big: false })),
        ("B", A::Motion(M::WordBackward { big: true })),
        ("e", A::Motion(M::EndOfWord { big: false })),
        ("E", A::Motion(M::EndOfWord { big: true })),
        ("(", A::Motion(M::SentenceBackward)),
        (")", A::Motion(M::SentenceForward)),
        ("{", A::Motion(M::ParagraphBackward)),
        ("}", A::Motion(M::ParagraphForward)),
        ("f", A::BeginFind(CharSearchKind::ToChar)),
        ("F", A::BeginFind(CharSearchKind::BackToChar)),
        ("t", A::BeginFind(CharSearchKind::TillChar)),
        ("T", A::BeginFind(CharSearchKind::BackTillChar)),
        ("d", A::Operator(Operator::Delete)),
        ("c", A::Operator(Operator::Change)),
        ("y", A::Operator(Operator::Yank)),
        ("g?", A::Operator(Operator::Rot13)),
        ("x", A::DeleteCharRight),
        ("X", A::DeleteCharLeft),
        ("D", A::DeleteToEnd),
        ("C", A::ChangeToEnd),
        ("p", A::PasteAfter),
        ("P", A::PasteBefore),
        ("r", A::BeginReplaceChar),
        ("i", A::InsertBefore),
        ("a", A::InsertAfter),
        ("I", A::InsertLineStart),
        ("A", A::InsertLineEnd),
        ("o", A::OpenBelow),
        ("O", A::OpenAbove),
        ("R", A::EnterReplace),
        ("v", A::VisualChar),
        ("V", A::VisualLine),
        ("m", A::BeginSetMark),
        ("`", A::BeginJumpMark { line_start: false }),
        ("'", A::BeginJumpMark { line_start: true }),
        (".", A::RepeatChange),
        (":", A::CommandLine(':')),
        ("/", A::CommandLine('/')),
        ("?", A::CommandLine('?')),
        ("\"", A::SelectRegister),
        ("n", A::SearchNext),
        ("N", A::SearchPrev),
    ];
    let mut table = CommandTable::new();
    for (text, action) in entries {
        table.insert(CommandName::from_text(text), action.clone());
    }
    table.insert(
        CommandName::OneKey(KeyInput::control('v')),
        NormalAction::VisualBlock,
    );
    table
}

/// In-flight Normal/Visual command state, discarded wholesale on Escape or
/// when a sequence turns out not to name anything.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    pub capture: CountCapture,
    pub count: Option<u32>,
    pub register: Option<RegisterName>,
    pub awaiting_register: bool,
    pub operator: Option<Operator>,
    /// Count typed before the operator key; multiplies with the motion count.
    pub operator_count: Option<u32>,
    pub name: Option<CommandName>,
    pub awaiting_char: Option<CharPending>,
}

impl Pending {
    pub fn is_empty(&self) -> bool {
        !self.capture.has_digits()
            && self.count.is_none()
            && self.register.is_none()
            && !self.awaiting_register
            && self.operator.is_none()
            && self.name.is_none()
            && self.awaiting_char.is_none()
    }
}

/// Outcome of feeding one key through count capture and table lookup.
pub(crate) enum KeyLookup {
    /// Consumed into pending state (digit or name prefix).
    Pending,
    Action(NormalAction),
    Unknown { had_pending: bool },
}

fn merge_counts(before: Option<u32>, after: Option<u32>) -> Option<u32> {
    match (before, after) {
        (None, None) => None,
        _ => Some(before.unwrap_or(1).saturating_mul(after.unwrap_or(1))),
    }
}

impl VimEngine {
    pub(crate) fn process_normal(&mut self, key: KeyInput) -> ProcessResult {
        if self.pending.awaiting_register {
            return self.handle_register_key(key);
        }
        if let Some(waiting) = self.pending.awaiting_char.take() {
            return self.finish_char_arg(waiting, key);
        }
        if key.is_escape() {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        match self.lookup_key(key) {
            KeyLookup::Pending => ProcessResult::Processed,
            KeyLookup::Action(action) => self.run_normal_action(action),
            KeyLookup::Unknown { had_pending: true } => {
                self.reset_pending();
                ProcessResult::Processed
            }
            KeyLookup::Unknown { had_pending: false } => ProcessResult::Unhandled,
        }
    }

    /// Count capture plus table resolution, shared by Normal and Visual.
    ///
    /// The table carries no name that is a strict prefix of another (`dd` is
    /// the doubled-operator rule, not an entry), so an ambiguous
    /// matched-and-prefix outcome cannot arise from the built-ins; if a host
    /// ever registers one we commit immediately rather than wait on a timer
    /// the engine does not own.
    pub(crate) fn lookup_key(&mut self, key: KeyInput) -> KeyLookup {
        let key = if self.pending.name.is_none() {
            match self.pending.capture.process(key) {
                CountResult::NeedMore(next) => {
                    self.pending.capture = next;
                    return KeyLookup::Pending;
                }
                CountResult::Complete { count, key } => {
                    if count.is_some() {
                        self.pending.count = count;
                    }
                    self.pending.capture = CountCapture::new();
                    key
                }
            }
        } else {
            key
        };
        let name = match self.pending.name.take() {
            Some(prefix) => prefix.add(key),
            None => CommandName::OneKey(key),
        };
        match self.table.matches(&name) {
            MatchResult::Matched(action) | MatchResult::MatchedAndPrefix(action) => {
                KeyLookup::Action(action)
            }
            MatchResult::Prefix => {
                self.pending.name = Some(name);
                KeyLookup::Pending
            }
            MatchResult::NoMatch => KeyLookup::Unknown {
                had_pending: !self.pending.is_empty() || name.len() > 1,
            },
        }
    }

    pub(crate) fn handle_register_key(&mut self, key: KeyInput) -> ProcessResult {
        self.pending.awaiting_register = false;
        match key.character().and_then(RegisterName::from_char) {
            Some(name) => self.pending.register = Some(name),
            None => self.reset_pending(),
        }
        ProcessResult::Processed
    }

    pub(crate) fn finish_char_arg(
        &mut self,
        waiting: CharPending,
        key: KeyInput,
    ) -> ProcessResult {
        if key.is_escape() {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let Some(argument) = key.character() else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        match waiting {
            CharPending::Find(kind) => {
                let motion = MotionKind::CharSearch {
                    kind,
                    target: argument,
                };
                match self.pending.operator {
                    Some(op) => self.apply_operator_motion(op, motion),
                    None => self.apply_pure_motion(motion, false),
                }
            }
            CharPending::ReplaceChar => self.replace_chars(argument),
            CharPending::SetMark => self.set_mark(argument),
            CharPending::JumpMark { line_start } => self.jump_to_mark(argument, line_start),
        }
    }

    fn run_normal_action(&mut self, action: NormalAction) -> ProcessResult {
        use NormalAction as A;
        // An operator only composes with motions; anything else cancels it.
        if self.pending.operator.is_some()
            && !matches!(action, A::Motion(_) | A::BeginFind(_) | A::Operator(_))
        {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        match action {
            A::Motion(token) => match self.pending.operator {
                Some(op) => self.apply_operator_motion(op, token.kind()),
                None => self.apply_pure_motion(token.kind(), token.is_vertical()),
            },
            A::BeginFind(kind) => {
                self.pending.awaiting_char = Some(CharPending::Find(kind));
                ProcessResult::Processed
            }
            A::Operator(op) => match self.pending.operator {
                Some(active) if active == op => self.run_doubled_operator(op),
                Some(_) => {
                    self.reset_pending();
                    ProcessResult::Processed
                }
                None => {
                    self.pending.operator = Some(op);
                    self.pending.operator_count = self.pending.count.take();
                    ProcessResult::Processed
                }
            },
            A::DeleteCharRight => self.delete_chars_right(),
            A::DeleteCharLeft => self.delete_chars_left(),
            A::DeleteToEnd => self.delete_to_line_end(false),
            A::ChangeToEnd => self.delete_to_line_end(true),
            A::PasteAfter => self.paste(true),
            A::PasteBefore => self.paste(false),
            A::BeginReplaceChar => {
                self.pending.awaiting_char = Some(CharPending::ReplaceChar);
                ProcessResult::Processed
            }
            A::InsertBefore => {
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::Insert)
            }
            A::InsertAfter => {
                let snapshot = self.snapshot();
                let length = self.line_length(&snapshot, self.caret.line);
                if length > 0 {
                    self.caret.column = (self.caret.column + 1).min(length);
                }
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::Insert)
            }
            A::InsertLineStart => {
                let snapshot = self.snapshot();
                if let Some(line) = snapshot.line_text(self.caret.line) {
                    self.caret.column = first_non_blank_column(&line);
                }
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::Insert)
            }
            A::InsertLineEnd => {
                let snapshot = self.snapshot();
                self.caret.column = self.line_length(&snapshot, self.caret.line);
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::Insert)
            }
            A::OpenBelow => self.open_line(true),
            A::OpenAbove => self.open_line(false),
            A::EnterReplace => {
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::Replace)
            }
            A::VisualChar => {
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::VisualCharacter)
            }
            A::VisualLine => {
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::VisualLine)
            }
            A::VisualBlock => {
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::VisualBlock)
            }
            A::BeginSetMark => {
                self.pending.awaiting_char = Some(CharPending::SetMark);
                ProcessResult::Processed
            }
            A::BeginJumpMark { line_start } => {
                self.pending.awaiting_char = Some(CharPending::JumpMark { line_start });
                ProcessResult::Processed
            }
            A::RepeatChange => self.repeat_last_change(),
            A::CommandLine(prefix) => {
                self.command_prefix = Some(prefix);
                self.command_line.clear();
                self.reset_pending();
                ProcessResult::SwitchMode(Mode::CommandLine)
            }
            A::SelectRegister => {
                self.pending.awaiting_register = true;
                ProcessResult::Processed
            }
            A::SearchNext => self.repeat_search(false),
            A::SearchPrev => self.repeat_search(true),
        }
    }

    // ---- motions ----------------------------------------------------------

    pub(crate) fn apply_pure_motion(
        &mut self,
        kind: MotionKind,
        vertical: bool,
    ) -> ProcessResult {
        let snapshot = self.snapshot();
        let mut request = MotionRequest::new(kind, self.caret);
        request.count = self.pending.count;
        if vertical {
            request.sticky_column = Some(self.sticky_column.unwrap_or(self.caret.column));
        }
        let Some(data) = vix_motion::evaluate(&snapshot, &request) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        if data.kind == OperationKind::LineWise {
            let target_line = if data.is_forward {
                snapshot
                    .point_of(data.span.end().saturating_sub(1))
                    .map(|p| p.line)
                    .unwrap_or(self.caret.line)
            } else {
                snapshot
                    .point_of(data.span.start)
                    .map(|p| p.line)
                    .unwrap_or(self.caret.line)
            };
            let column = if data.move_to_first_non_blank {
                snapshot
                    .line_text(target_line)
                    .map(|line| first_non_blank_column(&line))
                    .unwrap_or(0)
            } else if let Some(column) = data.explicit_column {
                if vertical {
                    self.sticky_column = Some(column);
                }
                column
            } else {
                self.caret.column
            };
            self.caret = Point::new(target_line, clamp_column(&snapshot, target_line, column));
        } else {
            let point = snapshot
                .point_of(data.caret_offset())
                .unwrap_or(self.caret);
            self.caret = Point::new(point.line, clamp_column(&snapshot, point.line, point.column));
        }
        if !vertical {
            self.sticky_column = None;
        }
        self.reset_pending();
        ProcessResult::Processed
    }

    fn apply_operator_motion(&mut self, op: Operator, kind: MotionKind) -> ProcessResult {
        let snapshot = self.snapshot();
        let mut request = MotionRequest::new(kind, self.caret);
        request.count = merge_counts(self.pending.operator_count, self.pending.count);
        let Some(data) = vix_motion::evaluate(&snapshot, &request) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        self.run_operator(op, data.span, data.kind)
    }

    fn run_doubled_operator(&mut self, op: Operator) -> ProcessResult {
        let snapshot = self.snapshot();
        let count =
            merge_counts(self.pending.operator_count, self.pending.count).unwrap_or(1) as usize;
        let first = self.caret.line;
        let last = (first + count - 1).min(snapshot.line_count().saturating_sub(1));
        let (Some(first_info), Some(last_info)) = (snapshot.line(first), snapshot.line(last))
        else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        let span = Span::from_bounds(first_info.start, last_info.end_including_break());
        self.run_operator(op, span, OperationKind::LineWise)
    }

    fn run_operator(&mut self, op: Operator, span: Span, kind: OperationKind) -> ProcessResult {
        let snapshot = self.snapshot();
        let text = snapshot.slice(span);
        let register = self.pending.register;
        debug!(
            target: "engine.operator",
            ?op,
            start = span.start,
            length = span.length,
            ?kind,
            "apply"
        );
        let result = match op {
            Operator::Delete => {
                if self.edit(span, "").is_some() {
                    self.registers
                        .record_delete(RegisterValue::of_text(text, kind), register);
                    self.caret_after_removal(span, kind);
                }
                ProcessResult::Processed
            }
            Operator::Change => {
                if self.edit(span, "").is_none() {
                    self.reset_pending();
                    return ProcessResult::Processed;
                }
                self.registers
                    .record_delete(RegisterValue::of_text(text, kind), register);
                if kind == OperationKind::LineWise {
                    self.reopen_changed_line(span.start);
                } else {
                    let after = self.snapshot();
                    self.caret = after
                        .point_of(span.start.min(after.char_count()))
                        .unwrap_or_default();
                }
                ProcessResult::SwitchMode(Mode::Insert)
            }
            Operator::Yank => {
                self.registers
                    .record_yank(RegisterValue::of_text(text, kind), register);
                let point = snapshot.point_of(span.start).unwrap_or(self.caret);
                let column = if kind == OperationKind::LineWise {
                    // Line-wise yank keeps the column, lands on the first line.
                    self.caret.column
                } else {
                    point.column
                };
                self.caret = Point::new(point.line, clamp_column(&snapshot, point.line, column));
                ProcessResult::Processed
            }
            Operator::Rot13 => {
                let rotated: String = text.chars().map(charutil::rot13).collect();
                if self.edit(span, &rotated).is_some() {
                    let after = self.snapshot();
                    let point = after.point_of(span.start).unwrap_or(self.caret);
                    self.caret =
                        Point::new(point.line, clamp_column(&after, point.line, point.column));
                }
                ProcessResult::Processed
            }
        };
        self.reset_pending();
        result
    }

    pub(crate) fn caret_after_removal(&mut self, span: Span, kind: OperationKind) {
        let snapshot = self.snapshot();
        let anchor = span.start.min(snapshot.char_count());
        let point = snapshot.point_of(anchor).unwrap_or_default();
        let line = point.line.min(snapshot.line_count().saturating_sub(1));
        let column = if kind == OperationKind::LineWise {
            snapshot
                .line_text(line)
                .map(|text| first_non_blank_column(&text))
                .unwrap_or(0)
        } else {
            point.column
        };
        self.caret = Point::new(line, clamp_column(&snapshot, line, column));
    }

    /// After a line-wise change the deleted lines collapse into one empty
    /// line the insert starts on.
    pub(crate) fn reopen_changed_line(&mut self, at: usize) {
        let needs_line = at < self.snapshot().char_count();
        if needs_line {
            let _ = self.edit(Span::new(at, 0), "\n");
        }
        let snapshot = self.snapshot();
        let line = snapshot.point_of(at).map(|p| p.line).unwrap_or(0);
        self.caret = Point::new(line, 0);
    }

    // ---- simple edits ------------------------------------------------------

    fn delete_chars_right(&mut self) -> ProcessResult {
        let snapshot = self.snapshot();
        let count = self.pending.count.unwrap_or(1) as usize;
        let Some(info) = snapshot.line(self.caret.line) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        if self.caret.column >= info.length {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let end = (self.caret.column + count).min(info.length);
        let span = Span::from_bounds(info.start + self.caret.column, info.start + end);
        let text = snapshot.slice(span);
        let register = self.pending.register;
        if self.edit(span, "").is_some() {
            self.registers.record_delete(
                RegisterValue::of_text(text, OperationKind::CharacterWise),
                register,
            );
            let after = self.snapshot();
            self.caret.column = clamp_column(&after, self.caret.line, self.caret.column);
        }
        self.reset_pending();
        ProcessResult::Processed
    }

    fn delete_chars_left(&mut self) -> ProcessResult {
        let snapshot = self.snapshot();
        let count = self.pending.count.unwrap_or(1) as usize;
        let Some(info) = snapshot.line(self.caret.line) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        if self.caret.column == 0 {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let start = self.caret.column.saturating_sub(count);
        let span = Span::from_bounds(info.start + start, info.start + self.caret.column);
        let text = snapshot.slice(span);
        let register = self.pending.register;
        if self.edit(span, "").is_some() {
            self.registers.record_delete(
                RegisterValue::of_text(text, OperationKind::CharacterWise),
                register,
            );
            self.caret.column = start;
        }
        self.reset_pending();
        ProcessResult::Processed
    }

    fn delete_to_line_end(&mut self, change: bool) -> ProcessResult {
        let snapshot = self.snapshot();
        let Some(info) = snapshot.line(self.caret.line) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        let from = info.start + self.caret.column.min(info.length);
        let span = Span::from_bounds(from, info.content_end());
        if !span.is_empty() {
            let text = snapshot.slice(span);
            let register = self.pending.register;
            if self.edit(span, "").is_some() {
                self.registers.record_delete(
                    RegisterValue::of_text(text, OperationKind::CharacterWise),
                    register,
                );
            }
        }
        self.reset_pending();
        if change {
            // Caret may rest past the last character while inserting.
            ProcessResult::SwitchMode(Mode::Insert)
        } else {
            let after = self.snapshot();
            self.caret.column = clamp_column(&after, self.caret.line, self.caret.column);
            ProcessResult::Processed
        }
    }

    fn replace_chars(&mut self, replacement: char) -> ProcessResult {
        let snapshot = self.snapshot();
        let count = self.pending.count.unwrap_or(1) as usize;
        let Some(info) = snapshot.line(self.caret.line) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        // Not enough characters under and after the caret: whole command fails.
        if self.caret.column + count > info.length {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let span = Span::new(info.start + self.caret.column, count);
        let text: String = replacement.to_string().repeat(count);
        if self.edit(span, &text).is_some() {
            self.caret.column += count - 1;
        }
        self.reset_pending();
        ProcessResult::Processed
    }

    // ---- paste -------------------------------------------------------------

    fn paste(&mut self, after: bool) -> ProcessResult {
        let name = self.pending.register.unwrap_or(RegisterName::Unnamed);
        let value = self.registers.get(name);
        if value.is_empty() {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let count = self.pending.count.unwrap_or(1) as usize;
        match value.kind() {
            OperationKind::LineWise => self.paste_lines(&value, after, count),
            OperationKind::BlockWise => self.paste_block(&value, after),
            OperationKind::CharacterWise => self.paste_chars(&value, after, count),
        }
        self.reset_pending();
        ProcessResult::Processed
    }

    fn paste_chars(&mut self, value: &RegisterValue, after: bool, count: usize) {
        let snapshot = self.snapshot();
        let Some(info) = snapshot.line(self.caret.line) else {
            return;
        };
        let text = value.string_value("\n").repeat(count);
        if text.is_empty() {
            return;
        }
        let column = if after && info.length > 0 {
            (self.caret.column + 1).min(info.length)
        } else {
            self.caret.column.min(info.length)
        };
        let at = info.start + column;
        if self.edit(Span::new(at, 0), &text).is_some() {
            let end = at + text.chars().count();
            let snapshot = self.snapshot();
            let point = snapshot.point_of(end.saturating_sub(1)).unwrap_or(self.caret);
            self.caret = Point::new(point.line, clamp_column(&snapshot, point.line, point.column));
        }
    }

    fn paste_lines(&mut self, value: &RegisterValue, after: bool, count: usize) {
        let snapshot = self.snapshot();
        let Some(info) = snapshot.line(self.caret.line) else {
            return;
        };
        let mut text = value.string_value("\n").repeat(count);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        let (at, target_line) = if after {
            (info.end_including_break(), self.caret.line + 1)
        } else {
            (info.start, self.caret.line)
        };
        // Pasting after the final, break-less line: the separator leads
        // instead of trailing.
        if after && info.line_break_length == 0 && info.content_end() == snapshot.char_count() {
            let body = text.strip_suffix('\n').unwrap_or(&text).to_string();
            text = format!("\n{body}");
        }
        if self.edit(Span::new(at, 0), &text).is_some() {
            let after_snapshot = self.snapshot();
            let column = after_snapshot
                .line_text(target_line)
                .map(|line| first_non_blank_column(&line))
                .unwrap_or(0);
            self.caret = Point::new(
                target_line,
                clamp_column(&after_snapshot, target_line, column),
            );
        }
    }

    fn paste_block(&mut self, value: &RegisterValue, after: bool) {
        let chunks: Vec<String> = match value.content() {
            RegisterContent::Block(lines) => lines.clone(),
            _ => value
                .string_value("\n")
                .split('\n')
                .map(str::to_string)
                .collect(),
        };
        let snapshot = self.snapshot();
        let base_length = self.line_length(&snapshot, self.caret.line);
        let column = if after && base_length > 0 {
            self.caret.column + 1
        } else {
            self.caret.column
        };
        for (row, chunk) in chunks.iter().enumerate() {
            if chunk.is_empty() {
                continue;
            }
            let snapshot = self.snapshot();
            let line = self.caret.line + row;
            if line >= snapshot.line_count() {
                // Extend the buffer with fresh lines below.
                let end = snapshot.char_count();
                let padding: String = " ".repeat(column);
                let _ = self.edit(Span::new(end, 0), &format!("\n{padding}{chunk}"));
                continue;
            }
            let Some(info) = snapshot.line(line) else {
                continue;
            };
            let insert_col = column.min(info.length);
            let padding = " ".repeat(column.saturating_sub(info.length));
            let _ = self.edit(
                Span::new(info.start + insert_col, 0),
                &format!("{padding}{chunk}"),
            );
        }
        let after_snapshot = self.snapshot();
        self.caret = Point::new(
            self.caret.line,
            clamp_column(&after_snapshot, self.caret.line, column),
        );
    }

    // ---- marks -------------------------------------------------------------

    fn set_mark(&mut self, mark: char) -> ProcessResult {
        self.reset_pending();
        if !mark.is_ascii_lowercase() {
            return ProcessResult::Processed;
        }
        let handle = self
            .buffer
            .create_tracking(self.caret.line, self.caret.column, Box::new(|| {}));
        if let Some(old) = self.marks.insert(mark, handle) {
            self.buffer.release_tracking(old);
        }
        ProcessResult::Processed
    }

    fn jump_to_mark(&mut self, mark: char, line_start: bool) -> ProcessResult {
        self.reset_pending();
        let Some(point) = self
            .marks
            .get(&mark)
            .and_then(|&handle| self.buffer.resolve_tracking(handle))
        else {
            return ProcessResult::Processed;
        };
        let snapshot = self.snapshot();
        let column = if line_start {
            snapshot
                .line_text(point.line)
                .map(|line| first_non_blank_column(&line))
                .unwrap_or(0)
        } else {
            point.column
        };
        self.caret = Point::new(point.line, clamp_column(&snapshot, point.line, column));
        ProcessResult::Processed
    }

    // ---- repeat ------------------------------------------------------------

    fn repeat_last_change(&mut self) -> ProcessResult {
        let Some(change) = self.changes.last_change().cloned() else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        let count = self.pending.count.unwrap_or(1);
        for _ in 0..count {
            for op in change.operations() {
                let snapshot = self.snapshot();
                let Some(offset) = snapshot.offset_of(self.caret) else {
                    break;
                };
                match op {
                    vix_state::ChangeOp::Insert(text) => {
                        if self.edit(Span::new(offset, 0), &text).is_some() {
                            let end = offset + text.chars().count();
                            let snapshot = self.snapshot();
                            self.caret = snapshot.point_of(end).unwrap_or(self.caret);
                        }
                    }
                    vix_state::ChangeOp::DeleteLeft(n) => {
                        let from = offset.saturating_sub(n);
                        if self.edit(Span::from_bounds(from, offset), "").is_some() {
                            let snapshot = self.snapshot();
                            self.caret = snapshot.point_of(from).unwrap_or(self.caret);
                        }
                    }
                }
            }
        }
        let snapshot = self.snapshot();
        self.caret.column = clamp_column(&snapshot, self.caret.line, self.caret.column);
        self.reset_pending();
        ProcessResult::Processed
    }

    // ---- line opening ------------------------------------------------------

    fn open_line(&mut self, below: bool) -> ProcessResult {
        let snapshot = self.snapshot();
        let Some(info) = snapshot.line(self.caret.line) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        let at = if below { info.content_end() } else { info.start };
        if self.edit(Span::new(at, 0), "\n").is_some() {
            let line = if below {
                self.caret.line + 1
            } else {
                self.caret.line
            };
            self.caret = Point::new(line, 0);
        }
        self.reset_pending();
        ProcessResult::SwitchMode(Mode::Insert)
    }

    // ---- search repeat -----------------------------------------------------

    pub(crate) fn repeat_search(&mut self, flip: bool) -> ProcessResult {
        let pattern = self
            .registers
            .get(RegisterName::LastSearch)
            .string_value("\n");
        if pattern.is_empty() {
            self.reset_pending();
            return ProcessResult::Processed;
        }
        let path = match (self.last_search_path, flip) {
            (path, false) => path,
            (SearchPath::Forward, true) => SearchPath::Backward,
            (SearchPath::Backward, true) => SearchPath::Forward,
        };
        let count = self.pending.count.unwrap_or(1);
        let snapshot = self.snapshot();
        let Some(mut position) = snapshot.offset_of(self.caret) else {
            self.reset_pending();
            return ProcessResult::Processed;
        };
        let flags = self.search_flags();
        for _ in 0..count {
            match vix_motion::find_next_match(&snapshot, &pattern, path, flags, position) {
                Some(hit) => position = hit.start,
                None => break,
            }
        }
        let point = snapshot.point_of(position).unwrap_or(self.caret);
        self.caret = Point::new(point.line, clamp_column(&snapshot, point.line, point.column));
        self.reset_pending();
        ProcessResult::Processed
    }
}
