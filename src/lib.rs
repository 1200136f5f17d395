#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense entries, keeps running totals and
//! mirrors the entry list to local storage.
//!
//! The reducer lives in `tracker-core`; this crate wires it to configuration,
//! JSON persistence and an interactive shell.

pub mod cli;
pub mod errors;
pub mod session;
pub mod utils;

pub use session::Tracker;
pub use tracker_core::{Action, CoreError, Summary};
pub use tracker_domain::{EditField, Entry, EntryKind, StoreState};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
