//! Error types for geyser-sync
//!
//! All modules use `SyncResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for geyser-sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// All errors that can occur during a sync run
#[derive(Error, Debug)]
pub enum SyncError {
    // State and settings errors
    #[error("State file not found: {0}")]
    StateNotFound(PathBuf),

    #[error("Invalid state file at {path}: {reason}")]
    StateInvalid { path: PathBuf, reason: String },

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // CI errors
    #[error("CI request failed: {url}: {reason}")]
    CiRequest { url: String, reason: String },

    #[error("Unexpected CI response from {url}: {reason}")]
    CiResponse { url: String, reason: String },

    #[error("Build identifier cannot be used in a filename: {0:?}")]
    InvalidBuildId(String),

    #[error("No artifact in build {build} matches filter '{filter}'")]
    NoMatchingArtifact { build: String, filter: String },

    // Transfer errors
    #[error("FTP permission error during {operation}: {reply}")]
    TransferPermission { operation: String, reply: String },

    #[error("FTP {operation} failed: {reason}")]
    Transfer { operation: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    User(String),
}

impl SyncError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a transfer error for an FTP operation
    pub fn transfer(operation: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transfer {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is a permission-class reply from the FTP server
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::TransferPermission { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::StateNotFound(_) => {
                Some("Create host.json with ftp_server, username, password and jenkins_host")
            }
            Self::TransferPermission { .. } => {
                Some("Check the FTP account can write to the remote plugin directory")
            }
            Self::NoMatchingArtifact { .. } => {
                Some("Adjust [artifact].filter in the configuration file")
            }
            Self::CiRequest { .. } => Some("Check jenkins_host points at the job URL"),
            _ => None,
        }
    }
}
