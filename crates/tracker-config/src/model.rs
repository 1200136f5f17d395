use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths;

/// Stores user-configurable tracker preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// strftime pattern for entry timestamps, rendered in local time.
    #[serde(default = "Config::default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Kind preselected in the new-entry form: `inc` or `exp`.
    #[serde(default = "Config::default_kind_value")]
    pub default_kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom location of the entry list. Defaults to `<data dir>/entries.json`.
    pub entries_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            timestamp_format: Self::default_timestamp_format(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_kind: Self::default_kind_value(),
            entries_file: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_timestamp_format() -> String {
        "%m/%d/%y, %I:%M %p".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_kind_value() -> String {
        "inc".into()
    }

    pub fn resolve_entries_file(&self, base: &Path) -> PathBuf {
        match &self.entries_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => paths::entries_file_in(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(cfg.currency_symbol, "€");
        assert_eq!(cfg.default_kind, "inc");
        assert!(cfg.ui_color_enabled);
    }

    #[test]
    fn unknown_keys_from_older_files_are_ignored() {
        let cfg: Config =
            serde_json::from_str(r#"{"locale":"pt-PT","currency_symbol":"€"}"#).unwrap();
        assert_eq!(cfg.currency_symbol, "€");
        assert_eq!(cfg.timestamp_format, Config::default_timestamp_format());
    }

    #[test]
    fn entries_file_resolves_against_base() {
        let base = Path::new("/srv/tracker");
        let mut cfg = Config::default();
        assert_eq!(
            cfg.resolve_entries_file(base),
            PathBuf::from("/srv/tracker/entries.json")
        );
        cfg.entries_file = Some(PathBuf::from("books/2024.json"));
        assert_eq!(
            cfg.resolve_entries_file(base),
            PathBuf::from("/srv/tracker/books/2024.json")
        );
    }
}
