use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use tracker_domain::Entry;

use crate::CoreError;

/// Durable home for the entry list. The store never calls it directly; the
/// session loads once at startup and saves the whole list after each change.
pub trait EntryStorage: Send + Sync {
    /// Returns the persisted list, or an empty list when nothing was stored.
    fn load_entries(&self) -> Result<Vec<Entry>, CoreError>;
    /// Replaces the persisted snapshot wholesale.
    fn save_entries(&self, entries: &[Entry]) -> Result<(), CoreError>;
}

/// Drops records that could never have been committed: duplicate ids, empty
/// descriptions, zero or non-finite amounts. Returns the kept entries together
/// with one warning per dropped record.
pub fn sanitize_entries(entries: Vec<Entry>) -> (Vec<Entry>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    let mut warnings = Vec::new();

    for entry in entries {
        if !seen.insert(entry.id) {
            warnings.push(format!("entry {} duplicates an earlier id", entry.id));
            continue;
        }
        if entry.description.is_empty() {
            warnings.push(format!("entry {} has an empty description", entry.id));
            continue;
        }
        if entry.amount == 0.0 || !entry.amount.is_finite() {
            warnings.push(format!(
                "entry {} has an unusable amount {}",
                entry.id, entry.amount
            ));
            continue;
        }
        kept.push(entry);
    }
    (kept, warnings)
}

/// Keeps the snapshot in memory. Backs tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryEntryStorage {
    entries: Mutex<Vec<Entry>>,
    saves: AtomicUsize,
}

impl MemoryEntryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save_entries` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Result<Vec<Entry>, CoreError> {
        self.load_entries()
    }
}

impl EntryStorage for MemoryEntryStorage {
    fn load_entries(&self) -> Result<Vec<Entry>, CoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        Ok(guard.clone())
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<(), CoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        *guard = entries.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracker_domain::EntryKind;

    use super::*;

    #[test]
    fn sanitize_drops_duplicates_and_invalid_records() {
        let first = Entry::new(EntryKind::Income, "salary", 1000.0, "");
        let duplicate = first.clone();
        let blank = Entry::new(EntryKind::Expense, "", 12.0, "");
        let zero = Entry::new(EntryKind::Expense, "nothing", 0.0, "");
        let refund = Entry::new(EntryKind::Expense, "refund", -20.0, "");

        let (kept, warnings) =
            sanitize_entries(vec![first.clone(), duplicate, blank, zero, refund.clone()]);

        assert_eq!(kept, vec![first, refund]);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn memory_storage_counts_saves() {
        let storage = MemoryEntryStorage::new();
        assert!(storage.load_entries().unwrap().is_empty());

        let entries = vec![Entry::new(EntryKind::Income, "gift", 50.0, "")];
        storage.save_entries(&entries).unwrap();

        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.snapshot().unwrap(), entries);
    }
}
