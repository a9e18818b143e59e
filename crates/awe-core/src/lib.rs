//! # awe-core: Pure Business Logic for the AWE Storefront
//!
//! This crate is the **heart** of the storefront. It owns the inventory
//! consistency rules and the checkout transaction, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AWE Storefront Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 awe-shop (terminal menus)                       │   │
//! │  │    Login ──► Browse ──► Cart ──► Checkout ──► Receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ awe-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │  │ catalogue │  │   cart    │  │ checkout  │  │  payment  │   │   │
//! │  │  │ Products  │  │ id → qty  │  │ validate  │  │ card/exp  │   │   │
//! │  │  │ filters   │  │ totals    │  │ + commit  │  │ cvv parse │   │   │
//! │  │  └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   storage traits (CatalogueStorage, CartStorage) ── no impls    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ implements traits                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 awe-store (JSON snapshots)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Category, CartEntry
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalogue`] - The product catalogue and its queries
//! - [`cart`] - The shopping cart (identifiers + quantities only)
//! - [`payment`] - Syntactic card-detail parsing
//! - [`checkout`] - Two-phase, all-or-nothing checkout
//! - [`storage`] - Collaborator traits implemented by the storage layer
//! - [`seed`] - The fixed sample catalogue
//! - [`validation`] - Field-level input validation
//! - [`error`] - Domain error types
//!
//! ## Invariants Protected Here
//!
//! 1. **Stock never goes negative**: only the catalogue mutates stock, and it
//!    rejects negative values.
//! 2. **Cart never exceeds stock**: re-checked against the live catalogue on
//!    every add, edit, and at checkout.
//! 3. **Checkout is all-or-nothing**: every check runs before the first write.
//!
//! ## Example Usage
//!
//! ```rust
//! use awe_core::{Cart, Catalogue};
//!
//! let catalogue = Catalogue::sample();
//! let mut cart = Cart::new();
//!
//! cart.add_item("000000001111", 2, &catalogue).unwrap();
//! assert_eq!(cart.total_price(&catalogue).unwrap().to_string(), "$2599.98");
//!
//! // Stock is 5: asking for 4 more would exceed it
//! assert!(cart.add_item("000000001111", 4, &catalogue).is_err());
//! assert_eq!(cart.quantity_of("000000001111"), Some(2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalogue;
pub mod checkout;
pub mod error;
pub mod money;
pub mod payment;
pub mod seed;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use awe_core::Cart` instead of
// `use awe_core::cart::Cart`

pub use cart::{Cart, CartLine};
pub use catalogue::Catalogue;
pub use checkout::{checkout, validate_cart, Receipt, ReceiptLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{CalendarMonth, PaymentDetails, PaymentField, RawPaymentDetails};
pub use storage::{CartStorage, CatalogueStorage, LoadError, StorageError};
pub use types::*;
