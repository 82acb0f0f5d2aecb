//! Persistence error types.
//!
//! Only writes fail. Reads of missing or corrupt data degrade to an empty
//! collection with a logged warning, so there are no read-side variants
//! here.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-file store rejected a write.
    #[error("Store rejected write for key {key}: {reason}")]
    Store { key: String, reason: String },

    /// The schema collection could not be serialized.
    #[error("Failed to serialize the form collection")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Store { key, .. } => {
                format!("Could not store the saved forms under '{}'", key)
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the form collection.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
