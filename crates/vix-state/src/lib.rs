//! vix-state: the mutable half of the engine.
//!
//! [`EditableBuffer`] owns the text and is the only mutation path; it
//! produces immutable snapshots, keeps [`TrackingTable`] positions current
//! across edits, and notifies subscribers synchronously. [`ChangeTracker`]
//! records Insert/Replace-mode edits for the repeat command, and
//! [`Settings`] exposes the host-pushed options the engine reads.

mod buffer;
mod change;
mod settings;
mod tracking;

pub use buffer::{BufferError, EditNotice, EditableBuffer, ListenerId};
pub use change::{ChangeOp, ChangeTracker, TextChange};
pub use settings::{Settings, keys as setting_keys};
pub use tracking::{CloseFn, LineEdit, TrackingHandle, TrackingTable};
