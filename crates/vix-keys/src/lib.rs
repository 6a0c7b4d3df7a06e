//! vix-keys: the logical keystroke value model.
//!
//! A [`KeyInput`] identifies a keystroke by what it *means*, not by how the
//! host produced it. Control sequences that terminals historically alias to
//! named keys (`<C-m>` / Enter, `<C-i>` / Tab, `<C-[>` / Escape) normalize to
//! the named form at construction, so equality and hashing see one canonical
//! value per logical key. Higher layers (count capture, command-name
//! resolution, mode dispatch) only ever compare canonical values.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Modifier flags carried by a [`KeyInput`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
    }
}

/// Symbolic (non-printable) keys the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// The key identity portion of a [`KeyInput`]: either a printable character
/// or a symbolic key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Named(NamedKey),
}

/// A single logical keystroke.
///
/// Equality is by logical identity: two `KeyInput`s are equal when they
/// denote the same keystroke, even if the host delivered them differently
/// (e.g. `Enter` vs `Ctrl+M`). Construction performs the normalization, so
/// the derived `PartialEq`/`Hash` are already canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    key: Key,
    mods: KeyModifiers,
}

impl KeyInput {
    /// Build a keystroke from a printable character. Uppercase ASCII letters
    /// imply the shift modifier (typing `A` is `Shift+a` logically).
    pub fn from_char(c: char) -> Self {
        let mods = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::empty()
        };
        Self {
            key: Key::Char(c),
            mods,
        }
    }

    /// Build a keystroke for a symbolic key with no modifiers.
    pub fn named(key: NamedKey) -> Self {
        Self {
            key: Key::Named(key),
            mods: KeyModifiers::empty(),
        }
    }

    /// Build a control chord over a character, normalizing the classic
    /// terminal aliases to their named-key identity.
    pub fn control(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'm' => Self::named(NamedKey::Enter),
            'i' => Self::named(NamedKey::Tab),
            '[' => Self::named(NamedKey::Escape),
            'h' => Self::named(NamedKey::Backspace),
            lower => Self {
                key: Key::Char(lower),
                mods: KeyModifiers::CTRL,
            },
        }
    }

    /// General constructor; applies the same normalization as the shorthand
    /// constructors so equality stays canonical regardless of entry path.
    pub fn new(key: Key, mods: KeyModifiers) -> Self {
        match key {
            Key::Char(c) if mods.contains(KeyModifiers::CTRL) => {
                let mut chord = Self::control(c);
                chord.mods |= mods - KeyModifiers::CTRL - KeyModifiers::SHIFT;
                chord
            }
            Key::Char(c) if c.is_ascii_uppercase() => Self {
                key,
                mods: mods | KeyModifiers::SHIFT,
            },
            _ => Self { key, mods },
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.mods
    }

    /// The printable character this keystroke denotes, if any.
    pub fn character(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c),
            Key::Named(NamedKey::Tab) => Some('\t'),
            Key::Named(_) => None,
        }
    }

    /// True for `0`..`9`.
    pub fn is_digit(&self) -> bool {
        matches!(self.key, Key::Char(c) if c.is_ascii_digit())
    }

    /// Numeric value for digit keys.
    pub fn digit_value(&self) -> Option<u32> {
        match self.key {
            Key::Char(c) => c.to_digit(10),
            Key::Named(_) => None,
        }
    }

    pub fn is_escape(&self) -> bool {
        self.key == Key::Named(NamedKey::Escape)
    }

    pub fn is_enter(&self) -> bool {
        self.key == Key::Named(NamedKey::Enter)
    }

    pub fn is_backspace(&self) -> bool {
        self.key == Key::Named(NamedKey::Backspace)
    }
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        KeyInput::from_char(c)
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            write!(f, "<C-")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{c}")?,
            Key::Named(n) => write!(f, "<{n:?}>")?,
        }
        if self.mods.contains(KeyModifiers::CTRL) {
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Convert a string of printable characters into keystrokes. Test and macro
/// plumbing; named keys never appear in the output.
pub fn keys_of(text: &str) -> Vec<KeyInput> {
    text.chars().map(KeyInput::from_char).collect()
}
