//! vix-engine: the modal command engine tying the layers together.
//!
//! [`VimEngine`] owns one editable buffer, the caret, the register table and
//! the repeat tracker, and routes every keystroke to the processor for the
//! active [`Mode`]. Mode processors are `impl` blocks in the sibling modules;
//! transitions flow back through [`VimEngine::process_key`], which performs
//! the entry/exit bookkeeping (visual anchor capture, change recording) in
//! one place so no processor can forget it.
//!
//! Key processing is total. Every key yields a [`ProcessResult`]; a key the
//! engine has no binding for reports [`ProcessResult::Unhandled`] so the host
//! can fall back to its own handling, and a key that merely fails to do
//! anything useful (motion at a buffer edge, paste from an empty register)
//! is still consumed.

mod cmdline;
mod disabled;
mod insert;
mod mode;
mod normal;
mod visual;

pub use mode::{Mode, ProcessResult};

use normal::Pending;
use std::collections::HashMap;
use tracing::{debug, error};
use vix_keymap::{CommandName, CommandTable};
use vix_keys::{KeyInput, keys_of};
use vix_motion::{MotionData, MotionRequest, SearchFlags, SearchPath, find_next_match};
use vix_registers::RegisterMap;
use vix_state::{
    ChangeTracker, EditableBuffer, Settings, TextChange, TrackingHandle, setting_keys,
};
use vix_text::{BufferSnapshot, Point, Span, TextSnapshot};

/// The command engine for one buffer session.
#[derive(Debug)]
pub struct VimEngine {
    buffer: EditableBuffer,
    caret: Point,
    mode: Mode,
    registers: RegisterMap,
    settings: Settings,
    changes: ChangeTracker,
    table: CommandTable<normal::NormalAction>,
    pending: Pending,
    visual_anchor: Option<Point>,
    sticky_column: Option<usize>,
    command_line: String,
    command_prefix: Option<char>,
    last_search_path: SearchPath,
    marks: HashMap<char, TrackingHandle>,
}

impl VimEngine {
    pub fn from_text(text: &str) -> Self {
        Self::with_buffer(EditableBuffer::from_text(text))
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Self::with_buffer(EditableBuffer::from_lines(lines))
    }

    pub fn with_buffer(buffer: EditableBuffer) -> Self {
        Self {
            buffer,
            caret: Point::default(),
            mode: Mode::Normal,
            registers: RegisterMap::default(),
            settings: Settings::default(),
            changes: ChangeTracker::new(),
            table: normal::command_table(),
            pending: Pending::default(),
            visual_anchor: None,
            sticky_column: None,
            command_line: String::new(),
            command_prefix: None,
            last_search_path: SearchPath::Forward,
            marks: HashMap::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn caret(&self) -> Point {
        self.caret
    }

    /// Move the caret, clamping to a position that exists in the buffer.
    pub fn set_caret(&mut self, point: Point) {
        let snapshot = self.buffer.snapshot();
        let line = point.line.min(snapshot.line_count().saturating_sub(1));
        self.caret = Point::new(line, clamp_column(&snapshot, line, point.column));
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    /// The whole buffer as a string. Test and host convenience.
    pub fn text(&self) -> String {
        let snapshot = self.buffer.snapshot();
        snapshot.slice(Span::new(0, snapshot.char_count()))
    }

    pub fn buffer(&self) -> &EditableBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditableBuffer {
        &mut self.buffer
    }

    pub fn registers(&self) -> &RegisterMap {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterMap {
        &mut self.registers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The current content of the command line, when in Command-line mode.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Feed one keystroke to the active mode.
    pub fn process_key(&mut self, key: KeyInput) -> ProcessResult {
        let result = match self.mode {
            Mode::Normal => self.process_normal(key),
            Mode::Insert | Mode::Replace => self.process_insert(key),
            Mode::VisualCharacter | Mode::VisualLine | Mode::VisualBlock => {
                self.process_visual(key)
            }
            Mode::CommandLine => self.process_command_line(key),
            Mode::Disabled => self.process_disabled(key),
        };
        if let ProcessResult::SwitchMode(target) = result {
            self.switch_mode(target);
        }
        result
    }

    /// Feed a string of printable characters, one keystroke per char.
    pub fn process_text(&mut self, text: &str) {
        for key in keys_of(text) {
            self.process_key(key);
        }
    }

    /// Take the engine out of the key stream. Only the re-enable command
    /// (see [`Self::disabled_commands`]) brings it back.
    pub fn disable(&mut self) {
        self.switch_mode(Mode::Disabled);
    }

    /// The commands Disabled mode answers to: exactly one, the re-enable
    /// chord.
    pub fn disabled_commands() -> Vec<CommandName> {
        vec![CommandName::OneKey(disabled::reenable_key())]
    }

    /// Evaluate a motion against the current buffer without moving anything.
    pub fn compute_motion(&self, request: &MotionRequest) -> Option<MotionData> {
        vix_motion::evaluate(&self.buffer.snapshot(), request)
    }

    /// Pattern search from an offset, honoring the ignore-case and wrap-scan
    /// settings.
    pub fn find_next(&self, pattern: &str, path: SearchPath, start: usize) -> Option<Span> {
        find_next_match(
            &self.buffer.snapshot(),
            pattern,
            path,
            self.search_flags(),
            start,
        )
    }

    // ---- position tracking ------------------------------------------------

    pub fn create_tracking(&mut self, point: Point) -> TrackingHandle {
        self.buffer
            .create_tracking(point.line, point.column, Box::new(|| {}))
    }

    pub fn resolve_tracking(&self, handle: TrackingHandle) -> Option<Point> {
        self.buffer.resolve_tracking(handle)
    }

    pub fn release_tracking(&mut self, handle: TrackingHandle) {
        self.buffer.release_tracking(handle);
    }

    /// Current position of a mark set with `m`.
    pub fn mark_point(&self, mark: char) -> Option<Point> {
        let handle = self.marks.get(&mark)?;
        self.buffer.resolve_tracking(*handle)
    }

    // ---- repeat -----------------------------------------------------------

    /// The last completed Insert/Replace-mode change, if any.
    pub fn last_change(&self) -> Option<&TextChange> {
        self.changes.last_change()
    }

    /// Install a repeat target directly, as if it had just been recorded.
    pub fn set_last_change(&mut self, change: TextChange) {
        self.changes.set_last_change(change);
    }

    // ---- internals --------------------------------------------------------

    fn switch_mode(&mut self, target: Mode) {
        if target == self.mode {
            return;
        }
        debug!(target: "engine.mode", from = %self.mode, to = %target, "switch");
        let keep_anchor = self.mode.is_visual() && target.is_visual();
        match self.mode {
            Mode::Insert | Mode::Replace => self.changes.complete(),
            Mode::CommandLine => {
                self.command_line.clear();
                self.command_prefix = None;
            }
            mode if mode.is_visual() && !keep_anchor => self.visual_anchor = None,
            _ => {}
        }
        match target {
            Mode::Insert | Mode::Replace => self.changes.start(),
            mode if mode.is_visual() && !keep_anchor => {
                self.visual_anchor = Some(self.caret);
            }
            _ => {}
        }
        self.mode = target;
    }

    pub(crate) fn reset_pending(&mut self) {
        self.pending = Pending::default();
    }

    /// Apply one edit, reporting failures through tracing instead of
    /// propagating: a rejected edit means an engine bug upstream produced an
    /// out-of-range span, and dropping the command is the recoverable answer.
    pub(crate) fn edit(&mut self, span: Span, text: &str) -> Option<BufferSnapshot> {
        match self.buffer.replace(span, text) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                error!(target: "engine", error = %err, "edit rejected");
                None
            }
        }
    }

    pub(crate) fn search_flags(&self) -> SearchFlags {
        let mut flags = SearchFlags::empty();
        if self
            .settings
            .get_bool(setting_keys::IGNORE_CASE)
            .unwrap_or(false)
        {
            flags |= SearchFlags::IGNORE_CASE;
        }
        if !self
            .settings
            .get_bool(setting_keys::WRAP_SCAN)
            .unwrap_or(true)
        {
            flags |= SearchFlags::NO_WRAP;
        }
        flags
    }

    pub(crate) fn line_length(&self, snapshot: &BufferSnapshot, line: usize) -> usize {
        snapshot.line(line).map(|info| info.length).unwrap_or(0)
    }
}

/// Largest caret column Normal mode allows on a line: the last character, or
/// column zero on an empty line.
pub(crate) fn clamp_column(snapshot: &BufferSnapshot, line: usize, column: usize) -> usize {
    match snapshot.line(line) {
        Some(info) => column.min(info.length.saturating_sub(1)),
        None => 0,
    }
}
