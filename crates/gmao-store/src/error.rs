//! Store error types.
//!
//! All store operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;

use gmao_model::{Collection, ModelError};
use thiserror::Error;

use crate::exchange::ImportError;
use crate::guard::DeleteBlocked;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend I/O error.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize the document")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// A submitted record failed validation; nothing was written.
    #[error(transparent)]
    Invalid(#[from] ModelError),

    /// Delete refused by the integrity guard; nothing was written.
    #[error(transparent)]
    DeleteBlocked(#[from] DeleteBlocked),

    /// Imported file rejected; current data untouched.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// No record with this id.
    #[error("No {} with id {id}", .collection.entity())]
    NotFound { collection: Collection, id: String },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the data to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Serialization { .. } => "An error occurred while saving the data.".to_string(),
            Self::Invalid(error) => format!("Record not saved: {error}."),
            Self::DeleteBlocked(blocked) => blocked.user_message(),
            Self::Import(error) => format!("Import failed: {error}."),
            Self::NotFound { collection, id } => {
                format!("There is no {} with id {}.", collection.entity(), id)
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data directory exists and is readable.".into())
                } else {
                    Some("Check that you have permission to write to the data directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose another data directory.".into())
            }
            Self::Serialization { .. } => None,
            Self::Invalid(_) => Some("Fill in every required field and try again.".into()),
            Self::DeleteBlocked(blocked) => Some(blocked.suggestion()),
            Self::Import(_) => Some(
                "Use a file produced by the export command: it must contain \
                 suppliers, machines, parts and interventions arrays."
                    .into(),
            ),
            Self::NotFound { collection, .. } => Some(format!(
                "List the {} to find the right id.",
                collection.key()
            )),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
