//! # Cart
//!
//! The shopping cart: an insertion-ordered list of (identifier, quantity).
//!
//! ## What the Cart Does NOT Hold
//! No names, no prices, no stock figures. Every read that needs them resolves
//! the identifier against the live [`Catalogue`] passed in by the caller, so a
//! price or stock edit made after an item was added is always seen.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shell Action             Operation                Stock baseline       │
//! │  ────────────             ─────────                ──────────────       │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item(id, q) ───────► in cart + q ≤ stock  │
//! │                                                                         │
//! │  "Change quantity" ─────► set_item_quantity(id,q)► q ≤ stock            │
//! │                           (q ≤ 0 means remove)     (overwrite, not add) │
//! │                                                                         │
//! │  "Remove item" ─────────► remove_item(id) ───────► -                    │
//! │                                                                         │
//! │  Successful checkout ───► clear() ───────────────► -                    │
//! │                                                                         │
//! │  A change whose total would not fit in Money is refused too.           │
//! │  Any failure leaves the cart exactly as it was.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::catalogue::Catalogue;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::storage::{CartStorage, LoadError};
use crate::types::{CartEntry, Product};

/// A cart entry resolved against the catalogue, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: i64,
    pub line_total: Money,
}

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by `product_id` (adding the same product again
///   increases its quantity)
/// - Every stored quantity is ≥ 1 (setting 0 removes the entry)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Builds a cart from stored entries.
    ///
    /// Rejects quantities below 1 and repeated identifiers.
    pub fn from_entries(entries: Vec<CartEntry>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for entry in entries {
            if entry.quantity < 1 {
                return Err(CoreError::InvalidQuantity(entry.quantity));
            }
            if cart.position(&entry.product_id).is_some() {
                return Err(CoreError::DuplicateIdentifier(entry.product_id));
            }
            cart.entries.push(entry);
        }
        Ok(cart)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads the saved cart. Never fails: a missing or corrupt snapshot gives
    /// an empty cart. Entries whose product is no longer in the catalogue are
    /// dropped.
    pub fn load<S>(storage: &S, catalogue: &Catalogue) -> Cart
    where
        S: CartStorage + ?Sized,
    {
        let mut cart = match storage.load_cart_entries() {
            Ok(entries) => match Cart::from_entries(entries) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, "Cart snapshot invalid, starting with an empty cart");
                    return Cart::new();
                }
            },
            Err(LoadError::NotFound) => {
                debug!("No cart snapshot, starting with an empty cart");
                return Cart::new();
            }
            Err(LoadError::Corrupt(reason)) => {
                warn!(%reason, "Cart snapshot corrupt, starting with an empty cart");
                return Cart::new();
            }
        };

        cart.entries.retain(|entry| {
            let known = catalogue.contains(&entry.product_id);
            if !known {
                warn!(id = %entry.product_id, "Dropping cart entry for unknown product");
            }
            known
        });

        debug!(items = cart.item_count(), "Cart loaded");
        cart
    }

    /// Writes the cart entries.
    pub fn persist<S>(&self, storage: &S) -> CoreResult<()>
    where
        S: CartStorage + ?Sized,
    {
        storage.save_cart_entries(&self.entries)?;
        debug!(items = self.item_count(), "Cart persisted");
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of a product, or increases its quantity.
    ///
    /// The stock check uses the resulting TOTAL for the product: existing
    /// cart quantity + `quantity` must not exceed current stock.
    ///
    /// ## Returns
    /// The product's new quantity in the cart.
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::{Cart, Catalogue, CoreError};
    ///
    /// let catalogue = Catalogue::sample(); // Laptop X1: stock 5
    /// let mut cart = Cart::new();
    ///
    /// assert_eq!(cart.add_item("000000001111", 3, &catalogue).unwrap(), 3);
    /// let err = cart.add_item("000000001111", 3, &catalogue).unwrap_err();
    /// assert!(matches!(err, CoreError::InsufficientStock { requested: 6, .. }));
    /// assert_eq!(cart.quantity_of("000000001111"), Some(3));
    /// ```
    pub fn add_item(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalogue: &Catalogue,
    ) -> CoreResult<i64> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let product = catalogue.find_by_identifier(product_id)?;
        let existing = self.quantity_of(product.identifier()).unwrap_or(0);
        let requested = existing
            .checked_add(quantity)
            .ok_or(CoreError::InvalidQuantity(quantity))?;

        if !product.can_supply(requested) {
            return Err(CoreError::InsufficientStock {
                name: product.name().to_string(),
                available: product.stock(),
                requested,
            });
        }

        self.commit_priced(product.identifier(), requested, catalogue)?;

        info!(id = %product.identifier(), quantity = requested, "Cart item added");
        Ok(requested)
    }

    /// Removes a product's entry.
    ///
    /// Fails with `NotInCart` (cart unchanged) when there is no entry.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::NotInCart(product_id.trim().to_string()))?;

        let removed = self.entries.remove(index);
        info!(id = %removed.product_id, "Cart item removed");
        Ok(())
    }

    /// Overwrites a product's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_item`]
    /// - otherwise the new quantity alone must fit in current stock; the
    ///   existing cart quantity is NOT added (this is an edit, not an add)
    /// - the product must already be in the cart
    pub fn set_item_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalogue: &Catalogue,
    ) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        if self.position(product_id).is_none() {
            return Err(CoreError::NotInCart(product_id.trim().to_string()));
        }

        let product = catalogue.find_by_identifier(product_id)?;
        if !product.can_supply(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name().to_string(),
                available: product.stock(),
                requested: quantity,
            });
        }

        self.commit_priced(product.identifier(), quantity, catalogue)?;
        info!(id = %product.identifier(), quantity, "Cart item quantity set");
        Ok(())
    }

    /// Stores `quantity` for a product only if the resulting cart can still
    /// be priced. On `TotalTooLarge` the cart is untouched.
    fn commit_priced(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalogue: &Catalogue,
    ) -> CoreResult<()> {
        let mut next = self.clone();
        match next.position(product_id) {
            Some(index) => next.entries[index].quantity = quantity,
            None => next.entries.push(CartEntry::new(product_id, quantity)),
        }

        next.total_price(catalogue)?;
        *self = next;
        Ok(())
    }

    /// Removes every entry. Called by a successful checkout commit.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Stored entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all quantities (saturating).
    pub fn total_quantity(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |total, e| total.saturating_add(e.quantity))
    }

    /// The quantity held for one product, if any.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.position(product_id).map(|i| self.entries[i].quantity)
    }

    /// Entries resolved against the live catalogue, in cart order.
    ///
    /// Entries whose product has since been removed are skipped. Fails with
    /// `TotalTooLarge` when a line total overflows.
    pub fn lines<'a>(&self, catalogue: &'a Catalogue) -> CoreResult<Vec<CartLine<'a>>> {
        self.entries
            .iter()
            .filter_map(|entry| {
                catalogue.get(&entry.product_id).map(|product| {
                    Ok(CartLine {
                        product,
                        quantity: entry.quantity,
                        line_total: line_total(product, entry.quantity)?,
                    })
                })
            })
            .collect()
    }

    /// Σ quantity × current unit price.
    ///
    /// Sums are exact in cents, so the result is already at currency
    /// precision. Fails with `TotalTooLarge` instead of wrapping.
    pub fn total_price(&self, catalogue: &Catalogue) -> CoreResult<Money> {
        let lines = self.lines(catalogue)?;
        Money::checked_sum(lines.iter().map(|l| l.line_total)).ok_or(CoreError::TotalTooLarge)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        let product_id = product_id.trim();
        self.entries
            .iter()
            .position(|e| e.product_id == product_id)
    }
}

/// Unit price × quantity, or `TotalTooLarge` on overflow.
pub(crate) fn line_total(product: &Product, quantity: i64) -> CoreResult<Money> {
    product
        .price()
        .multiply_quantity(quantity)
        .ok_or(CoreError::TotalTooLarge)
}

// =============================================================================
// Unit Tests
// =============================================================================
