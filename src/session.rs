//! A running tracker: one entry store plus the bridge that persists it.

use std::sync::Arc;

use tracker_config::Config;
use tracker_core::{
    time::{is_valid_format, DEFAULT_TIMESTAMP_FORMAT},
    Action, Clock, CoreError, EntryStorage, EntryStore, Summary, SystemClock, Transition,
};
use tracker_domain::{Entry, EntryKind, StoreState};

/// Owns the store for the lifetime of the application and mirrors every
/// entry-list change to storage.
pub struct Tracker {
    store: EntryStore,
    storage: Box<dyn EntryStorage>,
    last_persist_error: Option<String>,
}

impl Tracker {
    pub fn open(storage: Box<dyn EntryStorage>, config: &Config) -> Self {
        Self::open_with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Seeds the store from `storage`. A load failure starts an empty list.
    pub fn open_with_clock(
        storage: Box<dyn EntryStorage>,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let entries = match storage.load_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "could not load entries; starting empty");
                Vec::new()
            }
        };
        tracing::info!(entries = entries.len(), "tracker opened");

        let kind = EntryKind::parse(&config.default_kind).unwrap_or_else(|| {
            tracing::warn!(kind = %config.default_kind, "unknown default kind, using income");
            EntryKind::Income
        });
        let format = if is_valid_format(&config.timestamp_format) {
            config.timestamp_format.clone()
        } else {
            tracing::warn!(format = %config.timestamp_format, "invalid timestamp format, using default");
            DEFAULT_TIMESTAMP_FORMAT.to_string()
        };
        let store = EntryStore::with_clock(entries, clock)
            .with_timestamp_format(format)
            .with_draft_kind(kind);

        Self {
            store,
            storage,
            last_persist_error: None,
        }
    }

    /// Applies `action`. When the entry list changed the whole list is written
    /// back; a failed write is logged and kept for display, never returned.
    pub fn dispatch(&mut self, action: Action) -> Result<Transition, CoreError> {
        let transition = self.store.dispatch(action)?;
        if transition.entries_changed {
            self.persist();
        }
        Ok(transition)
    }

    fn persist(&mut self) {
        match self.storage.save_entries(self.store.entries()) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist entries");
                self.last_persist_error = Some(err.to_string());
            }
        }
    }

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn summary(&self) -> Summary<'_> {
        self.store.summary()
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }
}
