//! # Shell Error Type
//!
//! Unified error type for the terminal storefront.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Menu action                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session operation ── Result<T, AppError>                              │
//! │       │                                                                 │
//! │       ├── recoverable (stock, not found, bad card, bad input)          │
//! │       │       └──► message printed, menu shown again                   │
//! │       │                                                                 │
//! │       ├── InputClosed (end of stdin)                                   │
//! │       │       └──► clean exit, status 0                                │
//! │       │                                                                 │
//! │       └── anything else (unwritable data dir, bad config)              │
//! │               └──► logged, printed, process exits with status 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use awe_core::{CoreError, ValidationError};
use awe_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// A business rule rejected the action.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Typed input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A snapshot file could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration is present but unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The config file is not valid TOML.
    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Reading the terminal or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Argon2 could not hash a password.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,
}

impl AppError {
    /// Returns true when the menu can report the error and carry on.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Core(e) => e.is_recoverable(),
            AppError::Validation(_) => true,
            _ => false,
        }
    }
}

/// Result type for shell operations.
pub type AppResult<T> = Result<T, AppError>;
