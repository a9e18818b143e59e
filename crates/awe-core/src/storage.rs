//! # Storage Contracts
//!
//! The narrow interfaces through which the core reaches persisted state.
//! The core defines the traits; `awe-store` implements them over JSON files,
//! and tests implement them in memory.
//!
//! ## Load Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_products()                     load_cart_entries()               │
//! │    Ok(products)  → use them            Ok(entries)   → use them        │
//! │    NotFound      → seed + save         NotFound      → empty cart      │
//! │    Corrupt(..)   → seed + save         Corrupt(..)   → empty cart      │
//! │                                                                         │
//! │  A load never fails the session. Only a failed SAVE does, and only     │
//! │  when seeding after a failed load (nothing usable is left).             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{CartEntry, Product};

/// Why a snapshot could not be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing has been saved yet.
    #[error("snapshot not found")]
    NotFound,

    /// The snapshot exists but cannot be trusted.
    #[error("snapshot corrupt: {0}")]
    Corrupt(String),
}

/// A snapshot could not be written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        StorageError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Whole-file persistence of the product set.
pub trait CatalogueStorage {
    /// Loads every product, in display order.
    fn load_products(&self) -> Result<Vec<Product>, LoadError>;

    /// Replaces the stored product set.
    fn save_products(&self, products: &[Product]) -> Result<(), StorageError>;
}

/// Whole-file persistence of the cart.
pub trait CartStorage {
    /// Loads every cart entry, in insertion order.
    fn load_cart_entries(&self) -> Result<Vec<CartEntry>, LoadError>;

    /// Replaces the stored cart.
    fn save_cart_entries(&self, entries: &[CartEntry]) -> Result<(), StorageError>;
}

// =============================================================================
// In-memory storage for unit tests
// =============================================================================
