use std::{io, result::Result as StdResult};

use rustyline::error::ReadlineError;
use thiserror::Error;
use tracker_config::ConfigError;
use tracker_core::CoreError;

/// Unified error type for store, storage and configuration layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = StdResult<T, TrackerError>;

/// Failures that end the shell.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Tracker(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Tracker(err.into())
    }
}
