//! Command names: ordered, non-empty key sequences.
//!
//! Lookup is hot (every keystroke in Normal mode probes the table), so the
//! one- and two-key shapes avoid heap storage. Equality, ordering and
//! hashing are defined over the logical key sequence, never the shape: a
//! `OneKey` extended by `add` equals the `TwoKeys` built directly, and both
//! equal a `ManyKeys` holding the same two inputs.

use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::hash::{Hash, Hasher};
use vix_keys::KeyInput;

#[derive(Debug, Clone)]
pub enum CommandName {
    OneKey(KeyInput),
    TwoKeys(KeyInput, KeyInput),
    ManyKeys(SmallVec<[KeyInput; 4]>),
}

impl CommandName {
    /// Build from a non-empty key sequence, choosing the smallest shape.
    /// Panics on an empty slice; command names are non-empty by contract.
    pub fn from_keys(keys: &[KeyInput]) -> Self {
        match keys {
            [] => panic!("command names are non-empty"),
            [a] => Self::OneKey(*a),
            [a, b] => Self::TwoKeys(*a, *b),
            many => Self::ManyKeys(SmallVec::from_slice(many)),
        }
    }

    /// Build from a string of printable characters.
    pub fn from_text(text: &str) -> Self {
        Self::from_keys(&vix_keys::keys_of(text))
    }

    /// Append one key, producing the next-larger shape.
    pub fn add(&self, key: KeyInput) -> Self {
        match self {
            Self::OneKey(a) => Self::TwoKeys(*a, key),
            Self::TwoKeys(a, b) => Self::ManyKeys(smallvec![*a, *b, key]),
            Self::ManyKeys(keys) => {
                let mut keys = keys.clone();
                keys.push(key);
                Self::ManyKeys(keys)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::OneKey(_) => 1,
            Self::TwoKeys(..) => 2,
            Self::ManyKeys(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The key sequence regardless of shape.
    pub fn keys(&self) -> SmallVec<[KeyInput; 4]> {
        match self {
            Self::OneKey(a) => smallvec![*a],
            Self::TwoKeys(a, b) => smallvec![*a, *b],
            Self::ManyKeys(keys) => keys.clone(),
        }
    }

    pub fn key_at(&self, index: usize) -> Option<KeyInput> {
        match (self, index) {
            (Self::OneKey(a), 0) => Some(*a),
            (Self::TwoKeys(a, _), 0) => Some(*a),
            (Self::TwoKeys(_, b), 1) => Some(*b),
            (Self::ManyKeys(keys), i) => keys.get(i).copied(),
            _ => None,
        }
    }

    /// True when `self` is a strict prefix of `other`.
    pub fn is_strict_prefix_of(&self, other: &CommandName) -> bool {
        if self.len() >= other.len() {
            return false;
        }
        (0..self.len()).all(|i| self.key_at(i) == other.key_at(i))
    }
}

impl PartialEq for CommandName {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && (0..self.len()).all(|i| self.key_at(i) == other.key_at(i))
    }
}

impl Eq for CommandName {}

impl Hash for CommandName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for i in 0..self.len() {
            self.key_at(i).hash(state);
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            if let Some(key) = self.key_at(i) {
                write!(f, "{key}")?;
            }
        }
        Ok(())
    }
}
