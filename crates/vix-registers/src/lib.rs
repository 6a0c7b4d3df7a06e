//! vix-registers: the clipboard data model.
//!
//! [`RegisterName`] is the closed 74-member alphabet, [`RegisterValue`] the
//! tagged payload, and [`RegisterMap`] the session table that routes delete
//! and yank payloads the way the command layer expects.

mod name;
mod store;
mod value;

pub use name::RegisterName;
pub use store::{InMemoryStorage, Register, RegisterMap, RegisterStorage};
pub use value::{RegisterContent, RegisterValue};
