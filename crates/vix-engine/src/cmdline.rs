//! Command-line mode: the `:` / `/` / `?` line editor.
//!
//! The engine accumulates the typed line and executes it on Enter. Ex
//! handling is deliberately thin (line-number jumps); the executed text is
//! always recorded into the `:` register so hosts can surface history.
//! Search lines drive the pattern search and land the caret on the match.

use crate::mode::{Mode, ProcessResult};
use crate::{VimEngine, clamp_column};
use tracing::debug;
use vix_keys::KeyInput;
use vix_motion::{SearchPath, find_next_match, first_non_blank_column};
use vix_registers::{RegisterName, RegisterValue};
use vix_text::{OperationKind, Point, TextSnapshot};

impl VimEngine {
    pub(crate) fn process_command_line(&mut self, key: KeyInput) -> ProcessResult {
        if key.is_escape() {
            return ProcessResult::SwitchMode(Mode::Normal);
        }
        if key.is_enter() {
            self.execute_command_line();
            return ProcessResult::SwitchMode(Mode::Normal);
        }
        if key.is_backspace() {
            // Backspacing past the start abandons the line.
            if self.command_line.pop().is_none() {
                return ProcessResult::SwitchMode(Mode::Normal);
            }
            return ProcessResult::Processed;
        }
        if let Some(typed) = key.character() {
            self.command_line.push(typed);
            return ProcessResult::Processed;
        }
        ProcessResult::Unhandled
    }

    fn execute_command_line(&mut self) {
        let text = std::mem::take(&mut self.command_line);
        match self.command_prefix {
            Some(':') => self.execute_ex(&text),
            Some('/') => self.run_search(&text, SearchPath::Forward),
            Some('?') => self.run_search(&text, SearchPath::Backward),
            _ => {}
        }
    }

    fn execute_ex(&mut self, text: &str) {
        self.registers.set(
            RegisterName::LastCommand,
            RegisterValue::of_text(text, OperationKind::CharacterWise),
        );
        let trimmed = text.trim();
        let snapshot = self.snapshot();
        let target = if trimmed == "$" {
            Some(snapshot.line_count().saturating_sub(1))
        } else {
            trimmed.parse::<usize>().ok().map(|number| {
                number
                    .saturating_sub(1)
                    .min(snapshot.line_count().saturating_sub(1))
            })
        };
        match target {
            Some(line) => {
                let column = snapshot
                    .line_text(line)
                    .map(|content| first_non_blank_column(&content))
                    .unwrap_or(0);
                self.caret = Point::new(line, clamp_column(&snapshot, line, column));
            }
            None => {
                debug!(target: "engine.cmdline", command = trimmed, "unsupported ex command ignored");
            }
        }
    }

    pub(crate) fn run_search(&mut self, pattern: &str, path: SearchPath) {
        let pattern = if pattern.is_empty() {
            // Bare `/` or `?` reuses the last pattern.
            let prior = self
                .registers
                .get(RegisterName::LastSearch)
                .string_value("\n");
            if prior.is_empty() {
                return;
            }
            prior
        } else {
            self.registers.set(
                RegisterName::LastSearch,
                RegisterValue::of_text(pattern, OperationKind::CharacterWise),
            );
            pattern.to_string()
        };
        self.last_search_path = path;
        let snapshot = self.snapshot();
        let Some(start) = snapshot.offset_of(self.caret) else {
            return;
        };
        match find_next_match(&snapshot, &pattern, path, self.search_flags(), start) {
            Some(hit) => {
                let point = snapshot.point_of(hit.start).unwrap_or(self.caret);
                self.caret =
                    Point::new(point.line, clamp_column(&snapshot, point.line, point.column));
            }
            None => {
                debug!(target: "engine.search", pattern = %pattern, "no match");
            }
        }
    }
}
