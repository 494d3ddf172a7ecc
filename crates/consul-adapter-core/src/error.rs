//! Error types for the adapter core

use thiserror::Error;

/// Errors raised by the core and by the collaborators it drives
#[derive(Debug, Error)]
pub enum CoreError {
    // ============ Collaborator Errors ============
    #[error("Failed to list releases of {owner}/{repo}: {message}")]
    ReleaseLookup {
        owner: String,
        repo: String,
        message: String,
    },

    #[error("Failed to resolve app version of {chart}@{version}: {message}")]
    AppVersionLookup {
        chart: String,
        version: String,
        message: String,
    },

    #[error("Failed to list {owner}/{repo}/{path}: {message}")]
    DirectoryListing {
        owner: String,
        repo: String,
        path: String,
        message: String,
    },

    // ============ Configuration Errors ============
    #[error("Invalid adapter configuration: {message}")]
    InvalidConfig { message: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(e: serde_yaml::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
