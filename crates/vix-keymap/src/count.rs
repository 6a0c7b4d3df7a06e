//! Incremental count capture.
//!
//! Normal-mode commands may be prefixed with a repeat count. The parser is
//! an explicit state value rather than a closure chain: feeding it a key
//! either returns the continuation (more digits possible) or a completed
//! `(count, terminal key)` pair. A completed result carries `None` for the
//! count when no digits were typed, so callers can distinguish "no count"
//! from an explicit `1` at the point of use.

use tracing::trace;
use vix_keys::KeyInput;

/// In-progress count state. `process` consumes the state so a completed
/// capture can never be fed further keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountCapture {
    accumulated: Option<u32>,
}

/// Result of feeding one key to the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountResult {
    /// Digit consumed; keep feeding keys to the returned state.
    NeedMore(CountCapture),
    /// A non-digit arrived; capture is finished.
    Complete {
        /// `None` when the command had no explicit count.
        count: Option<u32>,
        /// The key that terminated the capture.
        key: KeyInput,
    },
}

impl CountCapture {
    pub fn new() -> Self {
        Self { accumulated: None }
    }

    /// True once at least one digit has been consumed.
    pub fn has_digits(&self) -> bool {
        self.accumulated.is_some()
    }

    /// Feed one key. Digits 1-9 always extend the count; `0` extends it only
    /// once a count has begun (a leading `0` is itself a command key and
    /// terminates immediately). Any other key terminates the capture.
    pub fn process(self, key: KeyInput) -> CountResult {
        match key.digit_value() {
            Some(d) if d != 0 || self.accumulated.is_some() => {
                let next = self
                    .accumulated
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(d);
                trace!(target: "keymap.count", count = next, "digit");
                CountResult::NeedMore(Self {
                    accumulated: Some(next),
                })
            }
            _ => CountResult::Complete {
                count: self.accumulated,
                key,
            },
        }
    }
}

/// Run a whole key sequence through a fresh capture. Returns `None` if the
/// sequence ends while digits are still pending.
pub fn capture_all(keys: &[KeyInput]) -> Option<(Option<u32>, KeyInput)> {
    let mut state = CountCapture::new();
    for &key in keys {
        match state.process(key) {
            CountResult::NeedMore(next) => state = next,
            CountResult::Complete { count, key } => return Some((count, key)),
        }
    }
    None
}
