//! tracker-core
//!
//! The entry store: action vocabulary, the pure reducer, derived totals and
//! the persistence-bridge contract.
//! Depends on tracker-domain. No CLI, no terminal I/O, no direct file access.

pub mod action;
pub mod error;
pub mod storage;
pub mod store;
pub mod summary;
pub mod time;

pub use action::Action;
pub use error::CoreError;
pub use storage::{EntryStorage, MemoryEntryStorage};
pub use store::{reduce, EntryStore, ReduceContext, Transition};
pub use summary::Summary;
pub use time::{Clock, FixedClock, SystemClock, DEFAULT_TIMESTAMP_FORMAT};
