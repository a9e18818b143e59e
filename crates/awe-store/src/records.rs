//! # Snapshot Records
//!
//! The on-disk shape of each snapshot file, kept separate from the domain
//! types so the file format can stay stable while the core evolves.
//!
//! ```text
//! catalogue.json                        cart.json
//! [                                     [
//!   {                                     { "upc": "000000001111",
//!     "upc": "000000001111",                "quantity": 2 }
//!     "name": "Laptop X1",              ]
//!     "description": "...",
//!     "price_cents": 129999,            users.json
//!     "category": "Computers",          [
//!     "stock": 5                          { "username": "alice",
//!   }                                       "password_hash": "$argon2id$..." }
//! ]                                     ]
//! ```

use awe_core::{CartEntry, Category, Money, Product, ValidationError};
use serde::{Deserialize, Serialize};

/// One product in `catalogue.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub upc: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub category: Category,
    pub stock: i64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            upc: product.identifier().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price_cents: product.price().cents(),
            category: product.category(),
            stock: product.stock(),
        }
    }
}

/// Re-runs every domain check, so a hand-edited file cannot smuggle in a
/// negative stock or an empty name.
impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Product::new(
            record.upc,
            record.name,
            record.description,
            Money::from_cents(record.price_cents),
            record.category,
            record.stock,
        )
    }
}

/// One line in `cart.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntryRecord {
    pub upc: String,
    pub quantity: i64,
}

impl From<&CartEntry> for CartEntryRecord {
    fn from(entry: &CartEntry) -> Self {
        CartEntryRecord {
            upc: entry.product_id.clone(),
            quantity: entry.quantity,
        }
    }
}

impl From<CartEntryRecord> for CartEntry {
    fn from(record: CartEntryRecord) -> Self {
        CartEntry::new(record.upc, record.quantity)
    }
}

/// One account in `users.json`. The hash is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}
