//! Register payloads.
//!
//! A value is tagged with the [`OperationKind`] of the operation that
//! produced it, which controls how a later paste applies it. The content is
//! plain text, a captured key sequence (macros — always character-wise,
//! since raw key capture has no notion of lines), or the per-line strings
//! of a block yank.

use vix_keys::KeyInput;
use vix_text::OperationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterContent {
    Text(String),
    Keys(Vec<KeyInput>),
    Block(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterValue {
    kind: OperationKind,
    content: RegisterContent,
}

impl Default for RegisterValue {
    fn default() -> Self {
        Self::of_text(String::new(), OperationKind::CharacterWise)
    }
}

impl RegisterValue {
    pub fn of_text(text: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            kind,
            content: RegisterContent::Text(text.into()),
        }
    }

    /// Captured keystrokes are always character-wise; there is no key-level
    /// way to produce a line-wise value.
    pub fn of_keys(keys: Vec<KeyInput>) -> Self {
        Self {
            kind: OperationKind::CharacterWise,
            content: RegisterContent::Keys(keys),
        }
    }

    pub fn of_block(lines: Vec<String>) -> Self {
        Self {
            kind: OperationKind::BlockWise,
            content: RegisterContent::Block(lines),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn content(&self) -> &RegisterContent {
        &self.content
    }

    /// Per-line strings of a block value.
    pub fn block_lines(&self) -> Option<&[String]> {
        match &self.content {
            RegisterContent::Block(lines) => Some(lines),
            _ => None,
        }
    }

    /// Render as a string. Block lines are joined with the host's line
    /// separator and the final line never gets a trailing separator.
    pub fn string_value(&self, line_separator: &str) -> String {
        match &self.content {
            RegisterContent::Text(text) => text.clone(),
            RegisterContent::Keys(keys) => keys.iter().filter_map(KeyInput::character).collect(),
            RegisterContent::Block(lines) => lines.join(line_separator),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.content {
            RegisterContent::Text(text) => text.is_empty(),
            RegisterContent::Keys(keys) => keys.is_empty(),
            RegisterContent::Block(lines) => lines.is_empty(),
        }
    }

    /// Append `other` for uppercase-register writes. Text renderings are
    /// concatenated (line-wise values keep their line structure by inserting
    /// the separator between the halves); the result is line-wise if either
    /// half was, otherwise character-wise.
    pub fn append(&self, other: &RegisterValue, line_separator: &str) -> RegisterValue {
        let line_wise = self.kind == OperationKind::LineWise
            || other.kind == OperationKind::LineWise;
        let mut text = self.string_value(line_separator);
        if line_wise && !text.is_empty() && !text.ends_with(line_separator) {
            text.push_str(line_separator);
        }
        text.push_str(&other.string_value(line_separator));
        RegisterValue::of_text(
            text,
            if line_wise {
                OperationKind::LineWise
            } else {
                OperationKind::CharacterWise
            },
        )
    }
}
