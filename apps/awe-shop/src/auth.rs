//! # Accounts
//!
//! Sign-up and sign-in against `users.json`.
//!
//! ## Credential Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  signup("alice", "hunter2")                                            │
//! │       │                                                                 │
//! │       ├── validate_username / validate_password                        │
//! │       ├── username taken? ──────────────► ValidationError::Duplicate   │
//! │       ▼                                                                 │
//! │  Argon2id(password, random salt) → "$argon2id$v=19$m=...$salt$hash"    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  users.json  [{ "username": "alice", "password_hash": "$argon2id..." }]│
//! │                                                                         │
//! │  login: PasswordHash::new(stored) → Argon2::verify_password            │
//! │  Plain-text passwords never reach disk or the logs.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use awe_core::validation::{validate_password, validate_username};
use awe_core::{LoadError, ValidationError};
use awe_store::{FileStore, UserRecord};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// The registered accounts.
#[derive(Debug, Clone, Default)]
pub struct Accounts {
    users: Vec<UserRecord>,
}

impl Accounts {
    /// Loads accounts. A missing file means none yet; a corrupt one is
    /// logged and treated as empty.
    pub fn load(store: &FileStore) -> Self {
        match store.load_users() {
            Ok(users) => Accounts { users },
            Err(LoadError::NotFound) => Accounts::default(),
            Err(LoadError::Corrupt(reason)) => {
                warn!(%reason, "User accounts file unreadable, starting with no accounts");
                Accounts::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Checks if the (trimmed) username is registered.
    pub fn contains(&self, username: &str) -> bool {
        let username = username.trim();
        self.users.iter().any(|u| u.username == username)
    }

    /// Checks a username before asking for a password.
    pub fn check_new_username(&self, username: &str) -> AppResult<()> {
        validate_username(username)?;
        if self.contains(username) {
            return Err(ValidationError::Duplicate {
                field: "username".to_string(),
                value: username.trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Registers an account and saves every account.
    pub fn register(&mut self, store: &FileStore, username: &str, password: &str) -> AppResult<()> {
        self.check_new_username(username)?;
        validate_password(password)?;

        let record = UserRecord {
            username: username.trim().to_string(),
            password_hash: hash_password(password)?,
        };
        self.users.push(record);

        if let Err(e) = store.save_users(&self.users) {
            self.users.pop();
            return Err(e.into());
        }

        info!(username = %username.trim(), "Account registered");
        Ok(())
    }

    /// Checks a username/password pair.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let username = username.trim();
        self.users
            .iter()
            .find(|u| u.username == username)
            .is_some_and(|u| verify_password(password, &u.password_hash))
    }
}

/// Hashes a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string. Malformed hashes never
/// verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
