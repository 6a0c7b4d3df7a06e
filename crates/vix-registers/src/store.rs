//! Register slots and the session-wide register table.
//!
//! Each [`Register`] delegates its payload to a [`RegisterStorage`]
//! strategy, so a host can mirror `*`/`+` into a real clipboard by plugging
//! in its own backing while everything else stays in memory. The
//! [`RegisterMap`] owns one register per name slot for the life of the
//! session and implements the write-routing rules (unnamed mirror,
//! numbered rotation, uppercase append, black hole discard).

use crate::{RegisterName, RegisterValue};
use std::collections::HashMap;
use tracing::debug;
use vix_text::OperationKind;

/// Pluggable payload backing for one register.
pub trait RegisterStorage: std::fmt::Debug {
    fn read(&self) -> RegisterValue;
    fn write(&mut self, value: RegisterValue);
}

/// Default backing: the value lives in the register itself.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    value: RegisterValue,
}

impl RegisterStorage for InMemoryStorage {
    fn read(&self) -> RegisterValue {
        self.value.clone()
    }

    fn write(&mut self, value: RegisterValue) {
        self.value = value;
    }
}

/// A named slot holding one value behind its storage strategy.
#[derive(Debug)]
pub struct Register {
    name: RegisterName,
    storage: Box<dyn RegisterStorage>,
}

impl Register {
    pub fn new(name: RegisterName) -> Self {
        Self::with_storage(name, Box::new(InMemoryStorage::default()))
    }

    pub fn with_storage(name: RegisterName, storage: Box<dyn RegisterStorage>) -> Self {
        Self { name, storage }
    }

    pub fn name(&self) -> RegisterName {
        self.name
    }

    pub fn value(&self) -> RegisterValue {
        self.storage.read()
    }

    pub fn set_value(&mut self, value: RegisterValue) {
        self.storage.write(value);
    }
}

/// The session-owned table of all 74 registers.
///
/// All access is synchronous on the dispatch thread; a write (including the
/// uppercase read-modify-write append) completes before control returns to
/// the caller, so re-entrant command dispatch can never observe a register
/// mid-update.
#[derive(Debug)]
pub struct RegisterMap {
    registers: HashMap<RegisterName, Register>,
    line_separator: String,
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::new("\n")
    }
}

impl RegisterMap {
    pub fn new(line_separator: &str) -> Self {
        let mut registers = HashMap::new();
        for name in RegisterName::all() {
            // Uppercase names alias their lowercase slot; only canonical
            // slots get storage.
            let slot = name.storage_slot();
            registers
                .entry(slot)
                .or_insert_with(|| Register::new(slot));
        }
        Self {
            registers,
            line_separator: line_separator.to_string(),
        }
    }

    /// Replace the storage strategy behind one slot (e.g. clipboard mirror
    /// for `+`). The current value is not migrated.
    pub fn set_storage(&mut self, name: RegisterName, storage: Box<dyn RegisterStorage>) {
        let slot = name.storage_slot();
        self.registers
            .insert(slot, Register::with_storage(slot, storage));
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    /// Current value of a register. The black hole always reads empty;
    /// uppercase names read their lowercase slot.
    pub fn get(&self, name: RegisterName) -> RegisterValue {
        if name.storage_slot() == RegisterName::Blackhole {
            return RegisterValue::default();
        }
        self.registers
            .get(&name.storage_slot())
            .map(Register::value)
            .unwrap_or_default()
    }

    /// Write a register. The black hole discards; uppercase names append to
    /// their lowercase slot; everything else replaces. Line-wise payloads are
    /// normalized to end with the separator on the way in, so later appends
    /// and pastes always see intact line structure.
    pub fn set(&mut self, name: RegisterName, value: RegisterValue) {
        let slot = name.storage_slot();
        if slot == RegisterName::Blackhole {
            return;
        }
        let value = self.normalize(value);
        let value = if name.is_append() {
            // A character-wise append can promote the slot to line-wise, so
            // the result gets the same treatment as the input.
            self.normalize(self.get(slot).append(&value, &self.line_separator))
        } else {
            value
        };
        debug!(target: "registers", register = %name.char(), kind = ?value.kind(), "write");
        if let Some(register) = self.registers.get_mut(&slot) {
            register.set_value(value);
        }
    }

    /// A line-wise span that ends on the buffer's final break-less line
    /// yields text without a trailing separator; restore it here so the
    /// value's kind and its rendering agree.
    fn normalize(&self, value: RegisterValue) -> RegisterValue {
        if value.kind() != OperationKind::LineWise {
            return value;
        }
        let text = value.string_value(&self.line_separator);
        if text.ends_with(self.line_separator.as_str()) {
            return value;
        }
        RegisterValue::of_text(
            text + &self.line_separator,
            OperationKind::LineWise,
        )
    }

    /// Route a delete's payload: the unnamed register always mirrors it; an
    /// explicit target also receives it; otherwise line-wise deletes rotate
    /// through `1`..`9` and smaller deletes land in `-`.
    pub fn record_delete(&mut self, value: RegisterValue, explicit: Option<RegisterName>) {
        self.set(RegisterName::Unnamed, value.clone());
        match explicit {
            Some(name) => self.set(name, value),
            None if value.kind() == OperationKind::LineWise => {
                for n in (1..9u8).rev() {
                    let shifted = self.get(RegisterName::Numbered(n));
                    self.set(RegisterName::Numbered(n + 1), shifted);
                }
                self.set(RegisterName::Numbered(1), value);
            }
            None => self.set(RegisterName::SmallDelete, value),
        }
    }

    /// Route a yank's payload: unnamed mirror plus register `0`, or the
    /// explicit target instead of `0`.
    pub fn record_yank(&mut self, value: RegisterValue, explicit: Option<RegisterName>) {
        self.set(RegisterName::Unnamed, value.clone());
        match explicit {
            Some(name) => self.set(name, value),
            None => self.set(RegisterName::Numbered(0), value),
        }
    }
}
