//! Disabled mode: the engine steps out of the key stream.
//!
//! Every key reports `Unhandled` so the host processes it natively; the one
//! exception is the re-enable chord, which brings the engine back to Normal
//! mode.

use crate::mode::{Mode, ProcessResult};
use crate::VimEngine;
use vix_keys::KeyInput;

/// The single command Disabled mode answers to.
pub(crate) fn reenable_key() -> KeyInput {
    KeyInput::control('^')
}

impl VimEngine {
    pub(crate) fn process_disabled(&mut self, key: KeyInput) -> ProcessResult {
        if key == reenable_key() {
            ProcessResult::SwitchMode(Mode::Normal)
        } else {
            ProcessResult::Unhandled
        }
    }
}
