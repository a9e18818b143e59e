//! # Store Error Types
//!
//! Error types for snapshot file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ├──── load path ──► LoadError::{NotFound, Corrupt} (awe-core)    │
//! │       │                   fallback policy decided by the core          │
//! │       │                                                                 │
//! │       └──── save path ──► StorageError (awe-core) ──► AppError (shell) │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use awe_core::{LoadError, StorageError};
use thiserror::Error;

/// Snapshot file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist yet.
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    /// Reading, writing or renaming failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed but a record failed field validation.
    #[error("Invalid record in {}: {reason}", path.display())]
    InvalidRecord { path: PathBuf, reason: String },
}

impl StoreError {
    /// Wraps an I/O error, mapping "not found" to [`StoreError::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound { path }
        } else {
            StoreError::Io { path, source }
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::InvalidRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Read failures become load outcomes.
///
/// ```text
/// StoreError::NotFound       → LoadError::NotFound
/// StoreError::Io             → LoadError::Corrupt (unreadable is untrustworthy)
/// StoreError::Json           → LoadError::Corrupt
/// StoreError::InvalidRecord  → LoadError::Corrupt
/// ```
impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => LoadError::NotFound,
            other => LoadError::Corrupt(other.to_string()),
        }
    }
}

/// Write failures cross into the core as an opaque message.
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        StorageError::new(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let err = StoreError::io(
            "data/cart.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(LoadError::from(err), LoadError::NotFound);
    }

    #[test]
    fn test_other_errors_map_to_corrupt() {
        let err = StoreError::io(
            "data/cart.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(LoadError::from(err), LoadError::Corrupt(_)));

        let err = StoreError::invalid_record("data/catalogue.json", "record 2: name is required");
        match LoadError::from(err) {
            LoadError::Corrupt(reason) => assert!(reason.contains("record 2")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_storage_error_keeps_message() {
        let err = StoreError::io(
            "/ro/catalogue.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let storage: StorageError = err.into();
        assert!(storage.message().contains("/ro/catalogue.json"));
    }
}
