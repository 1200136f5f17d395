//! tracker-domain
//!
//! Pure domain models (Entry, Draft, EditSession).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod entry;
pub mod state;

pub use common::*;
pub use entry::*;
pub use state::*;
