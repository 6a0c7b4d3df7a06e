//! The closed mode set and per-key processing outcomes.

use std::fmt;

/// Every mode the engine can be in. A closed set: dispatch matches
/// exhaustively, so adding a mode is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Normal,
    Insert,
    Replace,
    VisualCharacter,
    VisualLine,
    VisualBlock,
    CommandLine,
    Disabled,
}

impl Mode {
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            Mode::VisualCharacter | Mode::VisualLine | Mode::VisualBlock
        )
    }

    pub fn is_insert_like(&self) -> bool {
        matches!(self, Mode::Insert | Mode::Replace)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Replace => "replace",
            Mode::VisualCharacter => "visual",
            Mode::VisualLine => "visual-line",
            Mode::VisualBlock => "visual-block",
            Mode::CommandLine => "command",
            Mode::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

/// Outcome of feeding one key to the active mode. Key processing is total:
/// every key yields one of these, never a panic or error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// Key consumed; mode unchanged.
    Processed,
    /// Key consumed; the orchestrator should transition to the target mode
    /// (performing any entry/exit setup itself — the mode processor only
    /// signals).
    SwitchMode(Mode),
    /// Key not handled; the caller may fall back (e.g. pass it to the
    /// host editor unmodified).
    Unhandled,
}
