//! Command table with prefix-aware resolution.
//!
//! Resolution distinguishes four outcomes so the caller can implement the
//! classic disambiguation dance: commit on an unambiguous match, keep
//! reading keys on a strict prefix, and on a match-that-is-also-a-prefix
//! wait for either a non-extending key or the host's timeout. The timeout
//! itself is host policy; this table only reports the facts.

use crate::CommandName;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Outcome of probing the table with a captured key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<V> {
    /// Exact match and no longer command starts with this sequence.
    Matched(V),
    /// Not a command yet, but at least one registered name extends it.
    Prefix,
    /// Exact match that is simultaneously a strict prefix of a longer name.
    MatchedAndPrefix(V),
    /// Neither a command nor extendable into one.
    NoMatch,
}

/// Registered command names mapped to caller-chosen values.
#[derive(Debug, Clone, Default)]
pub struct CommandTable<V> {
    entries: HashMap<CommandName, V>,
}

impl<V: Clone> CommandTable<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a command. Re-registering a name replaces the previous
    /// binding (last writer wins, logged at debug).
    pub fn insert(&mut self, name: CommandName, value: V) {
        if self.entries.insert(name.clone(), value).is_some() {
            debug!(target: "keymap.table", name = %name, "rebinding command name");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &CommandName> {
        self.entries.keys()
    }

    /// Exact lookup without prefix analysis.
    pub fn get(&self, name: &CommandName) -> Option<&V> {
        self.entries.get(name)
    }

    /// True when some registered name strictly extends `name`.
    pub fn has_extension(&self, name: &CommandName) -> bool {
        self.entries
            .keys()
            .any(|candidate| name.is_strict_prefix_of(candidate))
    }

    /// Probe with a captured sequence.
    pub fn matches(&self, name: &CommandName) -> MatchResult<V> {
        let exact = self.entries.get(name);
        let extendable = self.has_extension(name);
        let result = match (exact, extendable) {
            (Some(v), false) => MatchResult::Matched(v.clone()),
            (Some(v), true) => MatchResult::MatchedAndPrefix(v.clone()),
            (None, true) => MatchResult::Prefix,
            (None, false) => MatchResult::NoMatch,
        };
        trace!(
            target: "keymap.table",
            name = %name,
            exact = exact.is_some(),
            extendable,
            "resolve"
        );
        result
    }
}
