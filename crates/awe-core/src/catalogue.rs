//! # Catalogue
//!
//! The product catalogue: sole owner of every [`Product`].
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalogue Operations                              │
//! │                                                                         │
//! │  READ (pure, never reorder the source)                                 │
//! │  ├── find_by_identifier(id)       → &Product | ProductNotFound         │
//! │  ├── filter_by_category(cat)      → Vec<&Product>                      │
//! │  ├── filter_by_price_order(asc)   → Vec<&Product>  (stable)            │
//! │  └── search_by_name(text)         → Vec<&Product>  (case-insensitive)  │
//! │                                                                         │
//! │  WRITE (caller persists afterwards)                                    │
//! │  ├── add_product(p)               → DuplicateIdentifier?               │
//! │  ├── remove_by_identifier(id)     → ProductNotFound?                   │
//! │  └── set_stock(id, n)             → InvalidQuantity if n < 0           │
//! │                                                                         │
//! │  PERSISTENCE                                                           │
//! │  ├── load(storage)    NotFound/Corrupt → sample data, saved at once    │
//! │  └── persist(storage) explicit, so edits can be batched               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup is a linear scan over an insertion-ordered `Vec`. Catalogues here
//! hold a handful of products, and a scan can never go stale after a removal.

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::seed::sample_products;
use crate::storage::{CatalogueStorage, LoadError};
use crate::types::{Category, Product};

/// An insertion-ordered set of products with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    products: Vec<Product>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Catalogue {
            products: Vec::new(),
        }
    }

    /// Builds a catalogue from products in display order.
    ///
    /// Fails with `DuplicateIdentifier` on the first repeated identifier.
    pub fn from_products(products: Vec<Product>) -> CoreResult<Self> {
        let mut catalogue = Catalogue::new();
        for product in products {
            catalogue.add_product(product)?;
        }
        Ok(catalogue)
    }

    /// The fixed sample catalogue.
    pub fn sample() -> Self {
        Catalogue {
            products: sample_products(),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads the catalogue, falling back to the sample data.
    ///
    /// ## Fallback Flow
    /// ```text
    /// storage.load_products()
    ///      │
    ///      ├── Ok(products), non-empty, unique ids ──► use them
    ///      │
    ///      ├── Ok(empty) / duplicate ids ─┐
    ///      ├── Err(Corrupt) ──────────────┼──► sample data ──► save_products
    ///      └── Err(NotFound) ─────────────┘                        │
    ///                                                  save fails? ▼
    ///                                              CoreError::Storage (fatal)
    /// ```
    pub fn load<S>(storage: &S) -> CoreResult<Self>
    where
        S: CatalogueStorage + ?Sized,
    {
        let reason = match storage.load_products() {
            Ok(products) if products.is_empty() => "catalogue snapshot is empty".to_string(),
            Ok(products) => match Catalogue::from_products(products) {
                Ok(catalogue) => {
                    debug!(count = catalogue.len(), "Catalogue loaded");
                    return Ok(catalogue);
                }
                Err(e) => e.to_string(),
            },
            Err(LoadError::NotFound) => {
                info!("No catalogue snapshot, seeding sample data");
                return Catalogue::seed(storage);
            }
            Err(LoadError::Corrupt(reason)) => reason,
        };

        warn!(%reason, "Catalogue snapshot unusable, seeding sample data");
        Catalogue::seed(storage)
    }

    fn seed<S>(storage: &S) -> CoreResult<Self>
    where
        S: CatalogueStorage + ?Sized,
    {
        let catalogue = Catalogue::sample();
        catalogue.persist(storage)?;
        info!(count = catalogue.len(), "Sample catalogue saved");
        Ok(catalogue)
    }

    /// Writes the full product set. Call after every successful mutation.
    pub fn persist<S>(&self, storage: &S) -> CoreResult<()>
    where
        S: CatalogueStorage + ?Sized,
    {
        storage.save_products(&self.products)?;
        debug!(count = self.len(), "Catalogue persisted");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All products in display (insertion) order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product, returning `None` when absent.
    pub fn get(&self, identifier: &str) -> Option<&Product> {
        self.position(identifier).map(|i| &self.products[i])
    }

    /// Checks if a product with this identifier exists.
    pub fn contains(&self, identifier: &str) -> bool {
        self.position(identifier).is_some()
    }

    /// Looks up a product, failing with `ProductNotFound` when absent.
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::Catalogue;
    ///
    /// let catalogue = Catalogue::sample();
    /// assert_eq!(
    ///     catalogue.find_by_identifier("000000003333").unwrap().name(),
    ///     "Bluetooth Speaker"
    /// );
    /// assert!(catalogue.find_by_identifier("999999999999").is_err());
    /// ```
    pub fn find_by_identifier(&self, identifier: &str) -> CoreResult<&Product> {
        self.get(identifier)
            .ok_or_else(|| CoreError::ProductNotFound(identifier.trim().to_string()))
    }

    /// Products in one category, in display order.
    pub fn filter_by_category(&self, category: Category) -> Vec<&Product> {
        let matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.category() == category)
            .collect();
        debug!(%category, count = matches.len(), "Filtered by category");
        matches
    }

    /// Every product ordered by unit price. Ties keep display order.
    pub fn filter_by_price_order(&self, ascending: bool) -> Vec<&Product> {
        let mut sorted: Vec<&Product> = self.products.iter().collect();
        if ascending {
            sorted.sort_by_key(|p| p.price());
        } else {
            sorted.sort_by(|a, b| b.price().cmp(&a.price()));
        }
        debug!(ascending, count = sorted.len(), "Sorted by price");
        sorted
    }

    /// Products whose name contains `text`, ignoring case.
    ///
    /// An empty (or blank) query matches everything.
    pub fn search_by_name(&self, text: &str) -> Vec<&Product> {
        let needle = text.trim().to_lowercase();
        let matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect();
        debug!(query = %needle, count = matches.len(), "Searched by name");
        matches
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a product. Identifiers must be unique.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        if self.contains(product.identifier()) {
            return Err(CoreError::DuplicateIdentifier(
                product.identifier().to_string(),
            ));
        }

        info!(id = %product.identifier(), name = %product.name(), "Product added");
        self.products.push(product);
        Ok(())
    }

    /// Deletes a product and hands it back.
    pub fn remove_by_identifier(&mut self, identifier: &str) -> CoreResult<Product> {
        let index = self
            .position(identifier)
            .ok_or_else(|| CoreError::ProductNotFound(identifier.trim().to_string()))?;

        let removed = self.products.remove(index);
        info!(id = %removed.identifier(), "Product removed");
        Ok(removed)
    }

    /// Overwrites the stock level. Negative values are rejected.
    pub fn set_stock(&mut self, identifier: &str, new_stock: i64) -> CoreResult<()> {
        if new_stock < 0 {
            return Err(CoreError::InvalidQuantity(new_stock));
        }

        let index = self
            .position(identifier)
            .ok_or_else(|| CoreError::ProductNotFound(identifier.trim().to_string()))?;

        let product = &mut self.products[index];
        info!(id = %product.identifier(), from = product.stock(), to = new_stock, "Stock set");
        product.set_stock(new_stock);
        Ok(())
    }

    // =========================================================================
    // Crate-internal helpers (checkout)
    // =========================================================================

    pub(crate) fn position(&self, identifier: &str) -> Option<usize> {
        let identifier = identifier.trim();
        self.products
            .iter()
            .position(|p| p.identifier() == identifier)
    }

    pub(crate) fn product_at(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Subtracts `quantity` from the product at `index`.
    ///
    /// Only called by the checkout commit, after validation has proven
    /// `quantity <= stock` under the same exclusive borrow.
    pub(crate) fn debit_at(&mut self, index: usize, quantity: i64) {
        if let Some(product) = self.products.get_mut(index) {
            debug_assert!(product.can_supply(quantity));
            let remaining = (product.stock() - quantity).max(0);
            product.set_stock(remaining);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::storage::memory::MemoryStorage;

    fn product(id: &str, name: &str, cents: i64, category: Category, stock: i64) -> Product {
        Product::new(id, name, "", Money::from_cents(cents), category, stock).unwrap()
    }

    fn catalogue() -> Catalogue {
        Catalogue::from_products(vec![
            product("A", "Gaming Laptop", 150000, Category::Computers, 2),
            product("B", "Soundbar", 20000, Category::Audio, 4),
            product("C", "OLED TV", 150000, Category::Tvs, 1),
            product("D", "Laptop Sleeve", 2500, Category::Computers, 9),
        ])
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.identifier().to_string()).collect()
    }

    #[test]
    fn test_find_by_identifier() {
        let catalogue = catalogue();
        assert_eq!(catalogue.find_by_identifier("C").unwrap().name(), "OLED TV");
        assert_eq!(
            catalogue.find_by_identifier("Z"),
            Err(CoreError::ProductNotFound("Z".to_string()))
        );
    }

    #[test]
    fn test_filter_by_category_keeps_display_order() {
        let catalogue = catalogue();
        assert_eq!(
            ids(&catalogue.filter_by_category(Category::Computers)),
            ["A", "D"]
        );
        assert!(Catalogue::new().filter_by_category(Category::Audio).is_empty());
    }

    #[test]
    fn test_filter_by_price_order_is_stable_and_pure() {
        let catalogue = catalogue();
        let before = catalogue.clone();

        assert_eq!(
            ids(&catalogue.filter_by_price_order(true)),
            ["D", "B", "A", "C"]
        );
        // A and C tie at 1500.00: display order is kept in both directions
        assert_eq!(
            ids(&catalogue.filter_by_price_order(false)),
            ["A", "C", "B", "D"]
        );
        assert_eq!(catalogue, before);
    }

    #[test]
    fn test_search_by_name_ignores_case() {
        let catalogue = catalogue();
        assert_eq!(ids(&catalogue.search_by_name("LAPTOP")), ["A", "D"]);
        assert_eq!(ids(&catalogue.search_by_name("  sound ")), ["B"]);
        assert!(catalogue.search_by_name("fridge").is_empty());
        assert_eq!(catalogue.search_by_name("").len(), 4);
    }

    #[test]
    fn test_add_product_rejects_duplicate() {
        let mut catalogue = catalogue();
        let err = catalogue
            .add_product(product("B", "Other", 1, Category::Audio, 1))
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateIdentifier("B".to_string()));
        assert_eq!(catalogue.len(), 4);

        catalogue
            .add_product(product("E", "Turntable", 30000, Category::Audio, 1))
            .unwrap();
        assert_eq!(catalogue.products().last().unwrap().identifier(), "E");
    }

    #[test]
    fn test_from_products_rejects_duplicates() {
        let result = Catalogue::from_products(vec![
            product("A", "One", 1, Category::Audio, 1),
            product("A", "Two", 1, Category::Audio, 1),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateIdentifier(_))));
    }

    #[test]
    fn test_remove_by_identifier() {
        let mut catalogue = catalogue();
        let removed = catalogue.remove_by_identifier("B").unwrap();
        assert_eq!(removed.name(), "Soundbar");
        assert!(!catalogue.contains("B"));
        assert!(matches!(
            catalogue.remove_by_identifier("B"),
            Err(CoreError::ProductNotFound(_))
        ));
        assert_eq!(catalogue.len(), 3);
    }

    #[test]
    fn test_set_stock() {
        let mut catalogue = catalogue();
        catalogue.set_stock("A", 0).unwrap();
        assert_eq!(catalogue.get("A").unwrap().stock(), 0);

        assert_eq!(
            catalogue.set_stock("A", -1),
            Err(CoreError::InvalidQuantity(-1))
        );
        assert_eq!(catalogue.get("A").unwrap().stock(), 0);

        assert!(matches!(
            catalogue.set_stock("Z", 3),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_load_seeds_when_missing() {
        let storage = MemoryStorage::default();
        let catalogue = Catalogue::load(&storage).unwrap();

        assert_eq!(catalogue, Catalogue::sample());
        assert_eq!(storage.saved_products(), Some(Catalogue::sample().products().to_vec()));
    }

    #[test]
    fn test_load_seeds_when_corrupt_or_empty() {
        let corrupt = MemoryStorage::with_products(Err(LoadError::Corrupt("bad json".into())));
        assert_eq!(Catalogue::load(&corrupt).unwrap(), Catalogue::sample());
        assert!(corrupt.saved_products().is_some());

        let empty = MemoryStorage::with_products(Ok(Vec::new()));
        assert_eq!(Catalogue::load(&empty).unwrap(), Catalogue::sample());

        let duplicated = MemoryStorage::with_products(Ok(vec![
            product("A", "One", 1, Category::Audio, 1),
            product("A", "Two", 1, Category::Audio, 1),
        ]));
        assert_eq!(Catalogue::load(&duplicated).unwrap(), Catalogue::sample());
    }

    #[test]
    fn test_load_uses_stored_products() {
        let stored = catalogue().products().to_vec();
        let storage = MemoryStorage::with_products(Ok(stored.clone()));

        let loaded = Catalogue::load(&storage).unwrap();
        assert_eq!(loaded.products(), stored.as_slice());
        assert!(storage.saved_products().is_none());
    }

    #[test]
    fn test_load_fails_only_when_seeding_cannot_save() {
        let storage = MemoryStorage::failing_writes();
        let err = Catalogue::load(&storage).unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(!err.is_recoverable());
    }
}
