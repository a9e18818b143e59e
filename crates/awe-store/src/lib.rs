//! # awe-store: Snapshot Storage for the AWE Storefront
//!
//! This crate persists storefront state as whole-file JSON snapshots and
//! implements the storage traits defined by `awe-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AWE Storefront Data Flow                         │
//! │                                                                         │
//! │  Shell action (add product, checkout, ...)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  awe-core: Catalogue::persist(&store) / Cart::persist(&store)          │
//! │       │            via CatalogueStorage / CartStorage                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   awe-store (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  FileStore    │    │   Records     │    │  StoreError  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ read/write    │◄───│ ProductRecord │    │ → LoadError  │  │   │
//! │  │   │ tmp + rename  │    │ CartEntryRec. │    │ → StorageErr │  │   │
//! │  │   │               │    │ UserRecord    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data dir>/catalogue.json   cart.json   users.json            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`file_store`] - The data-directory store and its trait impls
//! - [`records`] - On-disk record shapes and domain conversions
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use awe_core::Catalogue;
//! use awe_store::FileStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = FileStore::new(dir.path());
//!
//! let mut catalogue = Catalogue::load(&store).unwrap();
//! catalogue.set_stock("000000002222", 4).unwrap();
//! catalogue.persist(&store).unwrap();
//!
//! assert_eq!(Catalogue::load(&store).unwrap(), catalogue);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file_store;
pub mod records;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file_store::{FileStore, CART_FILE, CATALOGUE_FILE, USERS_FILE};
pub use records::{CartEntryRecord, ProductRecord, UserRecord};
