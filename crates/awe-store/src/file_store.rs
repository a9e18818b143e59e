//! # File Store
//!
//! Whole-file JSON snapshots in one data directory.
//!
//! ## Save Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    write_snapshot(catalogue.json)                       │
//! │                                                                         │
//! │  1. create_dir_all(data_dir)                                           │
//! │  2. serialize records (pretty JSON)                                    │
//! │  3. write  data_dir/catalogue.json.tmp                                 │
//! │  4. rename catalogue.json.tmp → catalogue.json                         │
//! │                                                                         │
//! │  A crash between 3 and 4 leaves the previous snapshot intact; the      │
//! │  stray .tmp file is overwritten by the next save.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Path
//! Missing file → `LoadError::NotFound`. Anything unreadable, unparseable or
//! failing record validation → `LoadError::Corrupt`. The core decides what
//! to do about either.

use std::fs;
use std::path::{Path, PathBuf};

use awe_core::{
    CartEntry, CartStorage, Catalogue, CatalogueStorage, LoadError, Product, StorageError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::records::{CartEntryRecord, ProductRecord, UserRecord};

/// Catalogue snapshot file name.
pub const CATALOGUE_FILE: &str = "catalogue.json";

/// Cart snapshot file name.
pub const CART_FILE: &str = "cart.json";

/// User accounts file name.
pub const USERS_FILE: &str = "users.json";

/// JSON snapshots rooted at a data directory.
///
/// ## Usage
/// ```rust
/// use awe_core::{Cart, Catalogue};
/// use awe_store::FileStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FileStore::new(dir.path());
///
/// // First run: no snapshot, so the sample catalogue is written
/// let catalogue = Catalogue::load(&store).unwrap();
/// assert!(store.catalogue_path().exists());
///
/// let cart = Cart::load(&store, &catalogue);
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store over `data_dir`. Nothing is touched until the first
    /// save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FileStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalogue_path(&self) -> PathBuf {
        self.data_dir.join(CATALOGUE_FILE)
    }

    pub fn cart_path(&self) -> PathBuf {
        self.data_dir.join(CART_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    // =========================================================================
    // Typed snapshots
    // =========================================================================

    /// Reads and validates `catalogue.json`.
    pub fn read_products(&self) -> StoreResult<Vec<Product>> {
        let path = self.catalogue_path();
        let records: Vec<ProductRecord> = read_snapshot(&path)?;

        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                Product::try_from(record).map_err(|e| {
                    StoreError::invalid_record(&path, format!("record {}: {}", i + 1, e))
                })
            })
            .collect()
    }

    /// Reads the catalogue snapshot and applies the storefront's own checks.
    /// An empty snapshot or repeated identifiers count as `Corrupt`, the same
    /// snapshots [`Catalogue::load`] would replace.
    pub fn load_catalogue(&self) -> Result<Catalogue, LoadError> {
        let products = self.load_products()?;
        if products.is_empty() {
            return Err(LoadError::Corrupt("catalogue snapshot is empty".to_string()));
        }
        Catalogue::from_products(products).map_err(|e| LoadError::Corrupt(e.to_string()))
    }

    pub fn write_products(&self, products: &[Product]) -> StoreResult<()> {
        let records: Vec<ProductRecord> = products.iter().map(ProductRecord::from).collect();
        write_snapshot(&self.catalogue_path(), &records)
    }

    /// Reads `cart.json`. Quantities and duplicates are checked by the cart.
    pub fn read_cart(&self) -> StoreResult<Vec<CartEntry>> {
        let records: Vec<CartEntryRecord> = read_snapshot(&self.cart_path())?;
        Ok(records.into_iter().map(CartEntry::from).collect())
    }

    pub fn write_cart(&self, entries: &[CartEntry]) -> StoreResult<()> {
        let records: Vec<CartEntryRecord> = entries.iter().map(CartEntryRecord::from).collect();
        write_snapshot(&self.cart_path(), &records)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Loads every account. A missing file means no accounts yet.
    pub fn load_users(&self) -> Result<Vec<UserRecord>, LoadError> {
        read_snapshot(&self.users_path()).map_err(LoadError::from)
    }

    pub fn save_users(&self, users: &[UserRecord]) -> StoreResult<()> {
        write_snapshot(&self.users_path(), users)?;
        info!(count = users.len(), "User accounts saved");
        Ok(())
    }
}

// =============================================================================
// Storage trait implementations
// =============================================================================

impl CatalogueStorage for FileStore {
    fn load_products(&self) -> Result<Vec<Product>, LoadError> {
        self.read_products().map_err(LoadError::from)
    }

    fn save_products(&self, products: &[Product]) -> Result<(), StorageError> {
        self.write_products(products).map_err(StorageError::from)
    }
}

impl CartStorage for FileStore {
    fn load_cart_entries(&self) -> Result<Vec<CartEntry>, LoadError> {
        self.read_cart().map_err(LoadError::from)
    }

    fn save_cart_entries(&self, entries: &[CartEntry]) -> Result<(), StorageError> {
        self.write_cart(entries).map_err(StorageError::from)
    }
}

// =============================================================================
// File helpers
// =============================================================================

fn read_snapshot<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value = serde_json::from_str(&contents).map_err(|e| StoreError::json(path, e))?;
    debug!(?path, "Snapshot read");
    Ok(value)
}

fn write_snapshot<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let contents = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;

    let tmp = temp_path(path);
    fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    debug!(?path, "Snapshot written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// =============================================================================
// Unit Tests
// =============================================================================
