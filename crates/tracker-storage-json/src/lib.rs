//! tracker-storage-json
//!
//! Filesystem persistence for the entry list as a single JSON array.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracker_core::{storage::sanitize_entries, CoreError, EntryStorage};
use tracker_domain::Entry;

pub const ENTRIES_FILE_NAME: &str = "entries.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the entry list in one JSON file, replacing it on every save.
#[derive(Debug, Clone)]
pub struct JsonEntryStorage {
    path: PathBuf,
}

impl JsonEntryStorage {
    pub fn new(path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// Uses `<dir>/entries.json`.
    pub fn in_dir(dir: &Path) -> Result<Self, CoreError> {
        Self::new(dir.join(ENTRIES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStorage for JsonEntryStorage {
    fn load_entries(&self) -> Result<Vec<Entry>, CoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(parse_entries(&data))
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<(), CoreError> {
        save_entries_to_path(entries, &self.path)
    }
}

/// Best-effort decoding of a persisted entry list.
///
/// Anything other than a JSON array yields an empty list. Records that fail to
/// decode or could not have been committed are skipped.
pub fn parse_entries(data: &str) -> Vec<Entry> {
    if data.trim().is_empty() {
        return Vec::new();
    }
    let records = match serde_json::from_str::<Value>(data) {
        Ok(Value::Array(records)) => records,
        Ok(Value::Null) => return Vec::new(),
        Ok(_) => {
            tracing::warn!("persisted entries are not a JSON array; starting empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "persisted entries are not valid JSON; starting empty");
            return Vec::new();
        }
    };

    let mut decoded = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Entry>(record) {
            Ok(entry) => decoded.push(entry),
            Err(err) => tracing::warn!(index, error = %err, "skipping unreadable entry"),
        }
    }

    let (entries, warnings) = sanitize_entries(decoded);
    for warning in warnings {
        tracing::warn!("skipping entry: {warning}");
    }
    entries
}

pub fn serialize_entries(entries: &[Entry]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Writes the list to `path` by staging to a sibling temporary file first.
pub fn save_entries_to_path(entries: &[Entry], path: &Path) -> Result<(), CoreError> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_entries(entries)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/entries.json")),
            PathBuf::from("/data/entries.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("entries")), PathBuf::from("entries.tmp"));
    }

    #[test]
    fn non_array_documents_parse_as_empty() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("null").is_empty());
        assert!(parse_entries("{\"entries\": []}").is_empty());
        assert!(parse_entries("[{").is_empty());
    }
}
