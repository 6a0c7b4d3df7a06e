//! vix-keymap: key-stream parsing for the command engine.
//!
//! Three pieces, layered the way Normal mode consumes keys: [`CountCapture`]
//! peels an optional numeric prefix off the stream, [`CommandName`] models
//! the remaining key sequence, and [`CommandTable`] resolves that sequence
//! against the registered grammar with prefix/ambiguity detection.

mod count;
mod name;
mod table;

pub use count::{CountCapture, CountResult, capture_all};
pub use name::CommandName;
pub use table::{CommandTable, MatchResult};
