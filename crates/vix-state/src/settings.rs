//! Read-only option accessors.
//!
//! The engine consumes a handful of numeric and boolean options (tab
//! width, shift width, expand-tab, ignore-case). Synchronizing these with
//! a host settings store is out of scope; a host pushes values in, the
//! engine only reads.

use std::collections::HashMap;

/// Well-known option keys.
pub mod keys {
    pub const TAB_STOP: &str = "tabstop";
    pub const SHIFT_WIDTH: &str = "shiftwidth";
    pub const EXPAND_TAB: &str = "expandtab";
    pub const IGNORE_CASE: &str = "ignorecase";
    pub const WRAP_SCAN: &str = "wrapscan";
}

#[derive(Debug, Clone)]
pub struct Settings {
    numbers: HashMap<String, i64>,
    bools: HashMap<String, bool>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut s = Self {
            numbers: HashMap::new(),
            bools: HashMap::new(),
        };
        s.set_number(keys::TAB_STOP, 8);
        s.set_number(keys::SHIFT_WIDTH, 8);
        s.set_bool(keys::EXPAND_TAB, false);
        s.set_bool(keys::IGNORE_CASE, false);
        s.set_bool(keys::WRAP_SCAN, true);
        s
    }
}

impl Settings {
    pub fn get_number(&self, key: &str) -> Option<i64> {
        self.numbers.get(key).copied()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }

    pub fn set_number(&mut self, key: &str, value: i64) {
        self.numbers.insert(key.to_string(), value);
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }
}
