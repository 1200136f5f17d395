use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("An entry is already being edited")]
    EditInProgress,
    #[error("No entry is being edited")]
    NoEditSession,
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Invalid action payload: {0}")]
    InvalidPayload(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Rejections that leave the store untouched and need no user-facing alert.
    pub fn is_silent(&self) -> bool {
        matches!(self, CoreError::EditInProgress)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
