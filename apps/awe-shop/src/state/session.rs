//! # Session
//!
//! Everything one storefront run works with, owned in one place and passed
//! explicitly to every menu.
//!
//! ## Persist-after-mutate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session operation          core call                  then persists   │
//! │  ─────────────────          ─────────                  ─────────────   │
//! │  add_to_cart ─────────────► Cart::add_item ──────────► cart.json       │
//! │  set_cart_quantity ───────► Cart::set_item_quantity ─► cart.json       │
//! │  remove_from_cart ────────► Cart::remove_item ───────► cart.json       │
//! │  checkout ────────────────► checkout() ──────────────► catalogue.json  │
//! │                                                         + cart.json     │
//! │  add_product / set_stock ─► Catalogue::* ────────────► catalogue.json  │
//! │  remove_product ──────────► Catalogue::remove... ────► catalogue.json  │
//! │                             (+ cart line dropped)       (+ cart.json)   │
//! │                                                                         │
//! │  A rejected operation changes nothing and writes nothing.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use awe_core::{
    checkout, validate_cart, CalendarMonth, Cart, Catalogue, Product, RawPaymentDetails, Receipt,
};
use awe_store::FileStore;
use tracing::info;

use crate::auth::Accounts;
use crate::error::AppResult;
use crate::state::AppConfig;

/// The storefront session context.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    store: FileStore,
    catalogue: Catalogue,
    cart: Cart,
    accounts: Accounts,
    user: Option<String>,
}

impl Session {
    /// Opens the data directory and loads all state.
    ///
    /// Fails only when the catalogue had to be seeded and the seed could
    /// not be written.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let store = FileStore::new(&config.data_dir);
        let catalogue = Catalogue::load(&store)?;
        let cart = Cart::load(&store, &catalogue);
        let accounts = Accounts::load(&store);

        info!(
            data_dir = %store.data_dir().display(),
            products = catalogue.len(),
            cart_items = cart.item_count(),
            accounts = accounts.len(),
            "Session opened"
        );

        Ok(Session {
            config,
            store,
            catalogue,
            cart,
            accounts,
            user: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// The signed-in username, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub fn sign_up(&mut self, username: &str, password: &str) -> AppResult<()> {
        self.accounts.register(&self.store, username, password)
    }

    /// Signs in on a matching username/password pair.
    pub fn sign_in(&mut self, username: &str, password: &str) -> bool {
        if !self.accounts.authenticate(username, password) {
            info!(username = %username.trim(), "Sign-in rejected");
            return false;
        }

        info!(username = %username.trim(), "Signed in");
        self.user = Some(username.trim().to_string());
        true
    }

    /// Saves everything and signs out.
    pub fn sign_out(&mut self) -> AppResult<()> {
        self.save_all()?;
        if let Some(user) = self.user.take() {
            info!(username = %user, "Signed out");
        }
        Ok(())
    }

    /// Writes the catalogue and the cart.
    pub fn save_all(&self) -> AppResult<()> {
        self.catalogue.persist(&self.store)?;
        self.cart.persist(&self.store)?;
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Returns the product's new cart quantity.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> AppResult<i64> {
        let total = self.cart.add_item(product_id, quantity, &self.catalogue)?;
        self.cart.persist(&self.store)?;
        Ok(total)
    }

    pub fn set_cart_quantity(&mut self, product_id: &str, quantity: i64) -> AppResult<()> {
        self.cart
            .set_item_quantity(product_id, quantity, &self.catalogue)?;
        self.cart.persist(&self.store)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> AppResult<()> {
        self.cart.remove_item(product_id)?;
        self.cart.persist(&self.store)?;
        Ok(())
    }

    /// Cart half of checkout validation, for failing before card entry.
    pub fn validate_cart(&self) -> AppResult<()> {
        validate_cart(&self.catalogue, &self.cart)?;
        Ok(())
    }

    /// Runs checkout and persists both snapshots on success.
    pub fn checkout(
        &mut self,
        payment: &RawPaymentDetails,
        today: CalendarMonth,
    ) -> AppResult<Receipt> {
        let receipt = checkout(&mut self.catalogue, &mut self.cart, payment, today)?;
        self.catalogue.persist(&self.store)?;
        self.cart.persist(&self.store)?;
        Ok(receipt)
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub fn add_product(&mut self, product: Product) -> AppResult<()> {
        self.catalogue.add_product(product)?;
        self.catalogue.persist(&self.store)?;
        Ok(())
    }

    pub fn set_stock(&mut self, product_id: &str, stock: i64) -> AppResult<()> {
        self.catalogue.set_stock(product_id, stock)?;
        self.catalogue.persist(&self.store)?;
        Ok(())
    }

    /// Removes a product, and its cart line if there is one.
    pub fn remove_product(&mut self, product_id: &str) -> AppResult<Product> {
        let removed = self.catalogue.remove_by_identifier(product_id)?;
        self.catalogue.persist(&self.store)?;

        if self.cart.quantity_of(removed.identifier()).is_some() {
            self.cart.remove_item(removed.identifier())?;
            self.cart.persist(&self.store)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use awe_core::{CoreError, CartStorage, Category, Money};
    use tempfile::TempDir;

    const LAPTOP: &str = "000000001111";

    fn open() -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let session = Session::open(config).unwrap();
        (dir, session)
    }

    fn reopen(session: &Session) -> Session {
        Session::open(session.config().clone()).unwrap()
    }

    fn valid_card() -> RawPaymentDetails {
        RawPaymentDetails::new("4111 1111 1111 1111", "12", "2099", "123")
    }

    #[test]
    fn test_open_seeds_catalogue() {
        let (_dir, session) = open();
        assert_eq!(session.catalogue(), &Catalogue::sample());
        assert!(session.store().catalogue_path().exists());
        assert!(session.cart().is_empty());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_cart_edits_are_persisted() {
        let (_dir, mut session) = open();
        assert_eq!(session.add_to_cart(LAPTOP, 2).unwrap(), 2);
        assert_eq!(reopen(&session).cart().quantity_of(LAPTOP), Some(2));

        session.set_cart_quantity(LAPTOP, 4).unwrap();
        assert_eq!(reopen(&session).cart().quantity_of(LAPTOP), Some(4));

        session.remove_from_cart(LAPTOP).unwrap();
        assert!(reopen(&session).cart().is_empty());
    }

    #[test]
    fn test_rejected_edit_writes_nothing() {
        let (_dir, mut session) = open();
        session.add_to_cart(LAPTOP, 3).unwrap();

        let err = session.add_to_cart(LAPTOP, 3).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::InsufficientStock { .. })));
        assert!(err.is_recoverable());
        assert_eq!(
            session.store().load_cart_entries().unwrap(),
            session.cart().entries().to_vec()
        );
    }

    #[test]
    fn test_checkout_persists_both() {
        let (_dir, mut session) = open();
        session.add_to_cart(LAPTOP, 2).unwrap();

        let receipt = session.checkout(&valid_card(), CalendarMonth::current()).unwrap();
        assert_eq!(receipt.total, Money::from_cents(259998));

        let reopened = reopen(&session);
        assert_eq!(reopened.catalogue().get(LAPTOP).unwrap().stock(), 3);
        assert!(reopened.cart().is_empty());
    }

    #[test]
    fn test_remove_product_drops_cart_line() {
        let (_dir, mut session) = open();
        session.add_to_cart(LAPTOP, 1).unwrap();

        let removed = session.remove_product(LAPTOP).unwrap();
        assert_eq!(removed.name(), "Laptop X1");
        assert!(session.cart().is_empty());

        let reopened = reopen(&session);
        assert!(!reopened.catalogue().contains(LAPTOP));
        assert!(reopened.cart().is_empty());
    }

    #[test]
    fn test_catalogue_admin_is_persisted() {
        let (_dir, mut session) = open();
        let product = Product::new(
            "000000004444",
            "Soundbar",
            "",
            Money::from_cents(24999),
            Category::Audio,
            2,
        )
        .unwrap();

        session.add_product(product).unwrap();
        session.set_stock("000000002222", 7).unwrap();

        let reopened = reopen(&session);
        assert!(reopened.catalogue().contains("000000004444"));
        assert_eq!(reopened.catalogue().get("000000002222").unwrap().stock(), 7);
    }

    #[test]
    fn test_sign_in_and_out() {
        let (_dir, mut session) = open();
        session.sign_up("alice", "secret").unwrap();

        assert!(!session.sign_in("alice", "nope"));
        assert!(session.user().is_none());

        assert!(session.sign_in("alice", "secret"));
        assert_eq!(session.user(), Some("alice"));

        session.sign_out().unwrap();
        assert!(session.user().is_none());
    }
}
