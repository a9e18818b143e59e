//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │   CartEntry     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  identifier     │   │  Computers      │   │  product_id ────┼──┐    │
//! │  │  name           │   │  TVs            │   │  quantity ≥ 1   │  │    │
//! │  │  description    │   │  Audio          │   └─────────────────┘  │    │
//! │  │  price (Money)  │   └─────────────────┘                        │    │
//! │  │  category       │◄─────────────────────────────────────────────┘    │
//! │  │  stock ≥ 0      │   resolved against the live catalogue, never      │
//! │  └─────────────────┘   copied                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_identifier, validate_product_name, ValidationResult};

// =============================================================================
// Category
// =============================================================================

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Computers,
    #[serde(rename = "TVs")]
    Tvs,
    Audio,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 3] = [Category::Computers, Category::Tvs, Category::Audio];

    /// Canonical display spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Computers => "Computers",
            Category::Tvs => "TVs",
            Category::Audio => "Audio",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Case-insensitive: `"tvs"`, `"TVs"` and `"TVS"` all parse.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalogue.
///
/// Fields are private: a product is validated once at construction and its
/// stock changes only through [`crate::Catalogue`], which refuses negative
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    identifier: String,
    name: String,
    description: String,
    price: Money,
    category: Category,
    stock: i64,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Rules
    /// - identifier: see [`validate_identifier`]
    /// - name: non-empty, at most 200 characters
    /// - price: non-negative
    /// - stock: non-negative
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::{Category, Money, Product};
    ///
    /// let speaker = Product::new(
    ///     "000000003333",
    ///     "Bluetooth Speaker",
    ///     "Portable speaker",
    ///     Money::from_cents(7999),
    ///     Category::Audio,
    ///     10,
    /// )
    /// .unwrap();
    /// assert!(speaker.is_in_stock());
    ///
    /// assert!(Product::new("x", "Bad", "", Money::zero(), Category::Audio, -1).is_err());
    /// ```
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: Category,
        stock: i64,
    ) -> ValidationResult<Self> {
        let identifier = identifier.into().trim().to_string();
        let name = name.into().trim().to_string();

        validate_identifier(&identifier)?;
        validate_product_name(&name)?;

        if price.is_negative() {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        if stock < 0 {
            return Err(ValidationError::Negative {
                field: "stock".to_string(),
            });
        }

        Ok(Product {
            identifier,
            name,
            description: description.into().trim().to_string(),
            price,
            category,
            stock,
        })
    }

    /// Unique, stable key (e.g. a 12-digit UPC).
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Quantity on hand. Never negative.
    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks if `quantity` units can be supplied from current stock.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }

    /// "In Stock" / "Out of Stock" label for listings.
    pub fn availability(&self) -> &'static str {
        if self.is_in_stock() {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }

    /// Overwrites stock. Callers inside the crate guarantee `stock >= 0`.
    pub(crate) fn set_stock(&mut self, stock: i64) {
        debug_assert!(stock >= 0);
        self.stock = stock;
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One cart line as stored: an identifier and a quantity, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: i64,
}

impl CartEntry {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        CartEntry {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop(stock: i64) -> ValidationResult<Product> {
        Product::new(
            "000000001111",
            "Laptop X1",
            "High performance laptop",
            Money::from_cents(129999),
            Category::Computers,
            stock,
        )
    }

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("computers".parse::<Category>().unwrap(), Category::Computers);
        assert_eq!("TVS".parse::<Category>().unwrap(), Category::Tvs);
        assert_eq!(" tvs ".parse::<Category>().unwrap(), Category::Tvs);
        assert_eq!("Audio".parse::<Category>().unwrap(), Category::Audio);
        assert!("Kitchen".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Tvs.to_string(), "TVs");
        assert_eq!(Category::Computers.to_string(), "Computers");
    }

    #[test]
    fn test_product_new_trims_and_validates() {
        let product = Product::new(
            " 000000001111 ",
            "  Laptop X1 ",
            " fast ",
            Money::from_cents(100),
            Category::Computers,
            0,
        )
        .unwrap();
        assert_eq!(product.identifier(), "000000001111");
        assert_eq!(product.name(), "Laptop X1");
        assert_eq!(product.description(), "fast");
        assert_eq!(product.availability(), "Out of Stock");
    }

    #[test]
    fn test_product_rejects_negative_values() {
        assert!(matches!(
            laptop(-1),
            Err(ValidationError::Negative { .. })
        ));

        let negative_price = Product::new(
            "1",
            "Thing",
            "",
            Money::from_cents(-1),
            Category::Audio,
            1,
        );
        assert!(negative_price.is_err());
    }

    #[test]
    fn test_can_supply() {
        let product = laptop(5).unwrap();
        assert!(product.can_supply(5));
        assert!(!product.can_supply(6));
        assert!(product.is_in_stock());
        assert_eq!(product.availability(), "In Stock");
    }
}
