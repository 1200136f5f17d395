use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "BUDGET_TRACKER_HOME";
const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const ENTRIES_FILE: &str = "entries.json";

/// Returns the application data directory, defaulting to `~/.budget_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

pub fn entries_file_in(base: &std::path::Path) -> PathBuf {
    base.join(ENTRIES_FILE)
}
