use thiserror::Error;

/// Failure of a key-value store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Failure of a directory fetch.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("API endpoint not found")]
    NotFound,
    #[error("Failed to fetch regions - {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed directory response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tagged outcome of a workflow step. The workflow's in-memory state has
/// already moved on when one of these is returned.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("API endpoint not found")]
    NotFound,
}

impl WorkflowError {
    /// Whether the user should be interrupted with a blocking alert.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, WorkflowError::NotFound)
    }
}

impl From<DirectoryError> for WorkflowError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => WorkflowError::NotFound,
            DirectoryError::Parse(e) => WorkflowError::Parse(e.to_string()),
            other => WorkflowError::Network(other.to_string()),
        }
    }
}
