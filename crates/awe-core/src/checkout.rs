//! # Checkout
//!
//! The storefront's one transaction: debit stock for every cart line and
//! empty the cart, or change nothing at all.
//!
//! ## Two Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     checkout(&mut catalogue, &mut cart, ..)             │
//! │                                                                         │
//! │  PHASE 1: VALIDATE (read-only)                                         │
//! │  ├── cart non-empty ................................. else EmptyCart   │
//! │  ├── each entry resolves to a product ......... else ProductNotFound   │
//! │  ├── each entry quantity ≤ live stock ........ else InsufficientStock  │
//! │  ├── line totals and their sum fit in Money ...... else TotalTooLarge  │
//! │  └── payment strings parse, card not expired .. else Malformed/Expired │
//! │           │                                                             │
//! │           │  any Err returns here: catalogue and cart untouched        │
//! │           ▼                                                             │
//! │  PHASE 2: COMMIT (cannot fail)                                         │
//! │  ├── stock -= quantity for every resolved entry                        │
//! │  ├── cart.clear()                                                      │
//! │  └── Receipt { order id, timestamp, lines, total, card last four }     │
//! │                                                                         │
//! │  The caller then persists the catalogue and the cart.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rollback is needed: every check runs before the first write, and the
//! `&mut` borrows keep anything else from touching stock in between.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::{line_total, Cart};
use crate::catalogue::Catalogue;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::payment::{CalendarMonth, PaymentDetails, RawPaymentDetails};

/// One purchased line, captured at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub identifier: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

/// Proof of a committed checkout. Never holds the full card number or the
/// security code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
    pub card_last_four: String,
}

impl Receipt {
    /// Total units purchased.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, l| total.saturating_add(l.quantity))
    }
}

/// A cart entry proven payable, with the catalogue slot it debits.
struct Debit {
    index: usize,
    line: ReceiptLine,
}

/// Checks the cart half of the validation phase without touching anything.
///
/// Lets the shell fail fast before asking for card details.
pub fn validate_cart(catalogue: &Catalogue, cart: &Cart) -> CoreResult<()> {
    resolve_cart(catalogue, cart).map(|_| ())
}

/// Resolves every entry to a debit and prices the order. The total is
/// computed here so the commit phase has nothing left that can fail.
fn resolve_cart(catalogue: &Catalogue, cart: &Cart) -> CoreResult<(Vec<Debit>, Money)> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let debits = cart
        .entries()
        .iter()
        .map(|entry| {
            let index = catalogue
                .position(&entry.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(entry.product_id.clone()))?;
            let product = catalogue
                .product_at(index)
                .ok_or_else(|| CoreError::ProductNotFound(entry.product_id.clone()))?;

            if !product.can_supply(entry.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name().to_string(),
                    available: product.stock(),
                    requested: entry.quantity,
                });
            }

            Ok(Debit {
                index,
                line: ReceiptLine {
                    identifier: product.identifier().to_string(),
                    name: product.name().to_string(),
                    unit_price: product.price(),
                    quantity: entry.quantity,
                    line_total: line_total(product, entry.quantity)?,
                },
            })
        })
        .collect::<CoreResult<Vec<Debit>>>()?;

    let total = Money::checked_sum(debits.iter().map(|d| d.line.line_total))
        .ok_or(CoreError::TotalTooLarge)?;
    Ok((debits, total))
}

/// Runs the checkout transaction.
///
/// ## Example
/// ```rust
/// use awe_core::{checkout, CalendarMonth, Cart, Catalogue, RawPaymentDetails};
///
/// let mut catalogue = Catalogue::sample();
/// let mut cart = Cart::new();
/// cart.add_item("000000003333", 2, &catalogue).unwrap(); // speaker, stock 10
///
/// let payment = RawPaymentDetails::new("4111 1111 1111 1111", "12", "2030", "123");
/// let today = CalendarMonth::new(2024, 6).unwrap();
/// let receipt = checkout(&mut catalogue, &mut cart, &payment, today).unwrap();
///
/// assert_eq!(receipt.total.to_string(), "$159.98");
/// assert_eq!(catalogue.get("000000003333").unwrap().stock(), 8);
/// assert!(cart.is_empty());
/// ```
pub fn checkout(
    catalogue: &mut Catalogue,
    cart: &mut Cart,
    payment: &RawPaymentDetails,
    today: CalendarMonth,
) -> CoreResult<Receipt> {
    // ---- validate ----
    let (debits, total) = resolve_cart(catalogue, cart)?;
    let details = PaymentDetails::parse(payment, today)?;
    debug!(lines = debits.len(), "Checkout validated");

    // ---- commit ----
    for debit in &debits {
        catalogue.debit_at(debit.index, debit.line.quantity);
    }
    cart.clear();

    let lines: Vec<ReceiptLine> = debits.into_iter().map(|d| d.line).collect();
    let receipt = Receipt {
        order_id: Uuid::new_v4(),
        completed_at: Utc::now(),
        total,
        lines,
        card_last_four: details.card_last_four().to_string(),
    };

    info!(
        order_id = %receipt.order_id,
        total = %receipt.total,
        items = receipt.total_quantity(),
        "Checkout committed"
    );
    Ok(receipt)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentField;
    use crate::types::{CartEntry, Category, Product};

    const LAPTOP: &str = "000000001111";
    const SPEAKER: &str = "000000003333";

    fn today() -> CalendarMonth {
        CalendarMonth::new(2024, 6).unwrap()
    }

    fn valid_payment() -> RawPaymentDetails {
        RawPaymentDetails::new("4111 1111 1111 1111", "12", "2030", "123")
    }

    fn filled_cart(catalogue: &Catalogue) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(LAPTOP, 2, catalogue).unwrap();
        cart.add_item(SPEAKER, 3, catalogue).unwrap();
        cart
    }

    /// Runs a failing checkout and asserts nothing moved.
    fn assert_rejected(
        catalogue: &mut Catalogue,
        cart: &mut Cart,
        payment: &RawPaymentDetails,
    ) -> CoreError {
        let catalogue_before = catalogue.clone();
        let cart_before = cart.clone();

        let err = checkout(catalogue, cart, payment, today()).unwrap_err();

        assert_eq!(*catalogue, catalogue_before);
        assert_eq!(*cart, cart_before);
        assert_eq!(
            serde_json::to_string(cart.entries()).unwrap(),
            serde_json::to_string(cart_before.entries()).unwrap()
        );
        err
    }

    #[test]
    fn test_checkout_commits() {
        let mut catalogue = Catalogue::sample();
        let mut cart = filled_cart(&catalogue);

        let receipt = checkout(&mut catalogue, &mut cart, &valid_payment(), today()).unwrap();

        assert_eq!(catalogue.get(LAPTOP).unwrap().stock(), 3);
        assert_eq!(catalogue.get(SPEAKER).unwrap().stock(), 7);
        assert_eq!(catalogue.get("000000002222").unwrap().stock(), 0);
        assert!(cart.is_empty());

        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].identifier, LAPTOP);
        assert_eq!(receipt.lines[0].line_total, Money::from_cents(259998));
        assert_eq!(receipt.total, Money::from_cents(259998 + 23997));
        assert_eq!(receipt.total_quantity(), 5);
        assert_eq!(receipt.card_last_four, "1111");
    }

    #[test]
    fn test_checkout_can_drain_stock_to_zero() {
        let mut catalogue = Catalogue::sample();
        let mut cart = Cart::new();
        cart.add_item(LAPTOP, 5, &catalogue).unwrap();

        checkout(&mut catalogue, &mut cart, &valid_payment(), today()).unwrap();
        assert_eq!(catalogue.get(LAPTOP).unwrap().stock(), 0);
        assert!(!catalogue.get(LAPTOP).unwrap().is_in_stock());
    }

    #[test]
    fn test_expired_card_changes_nothing() {
        let mut catalogue = Catalogue::sample();
        let mut cart = filled_cart(&catalogue);
        let expired = RawPaymentDetails::new("4111 1111 1111 1111", "01", "2020", "123");

        let err = assert_rejected(&mut catalogue, &mut cart, &expired);
        assert_eq!(err, CoreError::ExpiredCard { month: 1, year: 2020 });
    }

    #[test]
    fn test_malformed_payment_changes_nothing() {
        let mut catalogue = Catalogue::sample();
        let mut cart = filled_cart(&catalogue);
        let bad_cvv = RawPaymentDetails::new("4111111111111111", "12", "2030", "12");

        let err = assert_rejected(&mut catalogue, &mut cart, &bad_cvv);
        assert!(matches!(
            err,
            CoreError::MalformedPaymentField {
                field: PaymentField::SecurityCode,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_cart() {
        let mut catalogue = Catalogue::sample();
        let mut cart = Cart::new();

        let err = assert_rejected(&mut catalogue, &mut cart, &valid_payment());
        assert_eq!(err, CoreError::EmptyCart);
    }

    #[test]
    fn test_stock_dropped_after_add_blocks_whole_checkout() {
        let mut catalogue = Catalogue::sample();
        let mut cart = filled_cart(&catalogue);

        // The laptop line is still payable; the speaker line no longer is
        catalogue.set_stock(SPEAKER, 2).unwrap();

        let err = assert_rejected(&mut catalogue, &mut cart, &valid_payment());
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                name: "Bluetooth Speaker".to_string(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(catalogue.get(LAPTOP).unwrap().stock(), 5);
    }

    #[test]
    fn test_removed_product_blocks_checkout() {
        let mut catalogue = Catalogue::sample();
        let mut cart = filled_cart(&catalogue);
        catalogue.remove_by_identifier(SPEAKER).unwrap();

        let err = assert_rejected(&mut catalogue, &mut cart, &valid_payment());
        assert_eq!(err, CoreError::ProductNotFound(SPEAKER.to_string()));
    }

    #[test]
    fn test_unpriceable_cart_blocks_checkout() {
        let max = Money::parse("92233720368547758.07").unwrap();
        let priciest = Product::new("BIG", "Priciest", "", max, Category::Computers, 2).unwrap();
        let cheap = Product::new("A", "Cheap", "", Money::from_cents(100), Category::Audio, 5)
            .unwrap();
        let mut catalogue = Catalogue::from_products(vec![priciest, cheap]).unwrap();

        // In stock, but one line total overflows
        let mut cart = Cart::from_entries(vec![CartEntry::new("BIG", 2)]).unwrap();
        let err = assert_rejected(&mut catalogue, &mut cart, &valid_payment());
        assert_eq!(err, CoreError::TotalTooLarge);

        // Each line fits, their sum does not
        let mut cart =
            Cart::from_entries(vec![CartEntry::new("BIG", 1), CartEntry::new("A", 1)]).unwrap();
        let err = assert_rejected(&mut catalogue, &mut cart, &valid_payment());
        assert_eq!(err, CoreError::TotalTooLarge);
        assert_eq!(validate_cart(&catalogue, &cart), Err(CoreError::TotalTooLarge));
        assert_eq!(catalogue.get("BIG").unwrap().stock(), 2);
    }

    #[test]
    fn test_cart_checked_before_payment() {
        let mut catalogue = Catalogue::sample();
        let mut cart = Cart::new();
        let garbage = RawPaymentDetails::default();

        assert_eq!(
            checkout(&mut catalogue, &mut cart, &garbage, today()),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_validate_cart_is_read_only() {
        let mut catalogue = Catalogue::sample();
        let cart = filled_cart(&catalogue);
        assert!(validate_cart(&catalogue, &cart).is_ok());

        catalogue.set_stock(LAPTOP, 1).unwrap();
        assert!(matches!(
            validate_cart(&catalogue, &cart),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(catalogue.get(LAPTOP).unwrap().stock(), 1);
        assert_eq!(cart.quantity_of(LAPTOP), Some(2));
    }

    #[test]
    fn test_receipt_ids_are_unique() {
        let mut catalogue = Catalogue::sample();

        let mut first_cart = Cart::new();
        first_cart.add_item(SPEAKER, 1, &catalogue).unwrap();
        let first = checkout(&mut catalogue, &mut first_cart, &valid_payment(), today()).unwrap();

        let mut second_cart = Cart::new();
        second_cart.add_item(SPEAKER, 1, &catalogue).unwrap();
        let second = checkout(&mut catalogue, &mut second_cart, &valid_payment(), today()).unwrap();

        assert_ne!(first.order_id, second.order_id);
        assert_eq!(catalogue.get(SPEAKER).unwrap().stock(), 8);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, i64),
            Set(usize, i64),
            Remove(usize),
            Restock(usize, i64),
            Checkout,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..3usize, -2i64..8).prop_map(|(p, q)| Op::Add(p, q)),
                (0..3usize, -2i64..8).prop_map(|(p, q)| Op::Set(p, q)),
                (0..3usize).prop_map(Op::Remove),
                (0..3usize, 0i64..6).prop_map(|(p, s)| Op::Restock(p, s)),
                Just(Op::Checkout),
            ]
        }

        fn catalogue() -> Catalogue {
            let products = ["A", "B", "C"]
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    Product::new(
                        *id,
                        format!("Item {}", id),
                        "",
                        Money::from_cents(100 * (i as i64 + 1)),
                        Category::Audio,
                        3,
                    )
                    .unwrap()
                })
                .collect();
            Catalogue::from_products(products).unwrap()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of cart edits, restocks and checkouts
            /// drives stock below zero, and every failure is a no-op.
            #[test]
            fn stock_never_negative(ops in prop::collection::vec(op(), 1..40)) {
                let ids = ["A", "B", "C"];
                let mut catalogue = catalogue();
                let mut cart = Cart::new();

                for op in ops {
                    let catalogue_before = catalogue.clone();
                    let cart_before = cart.clone();

                    let result = match op.clone() {
                        Op::Add(p, q) => cart.add_item(ids[p], q, &catalogue).map(|_| ()),
                        Op::Set(p, q) => cart.set_item_quantity(ids[p], q, &catalogue),
                        Op::Remove(p) => cart.remove_item(ids[p]),
                        Op::Restock(p, s) => catalogue.set_stock(ids[p], s),
                        Op::Checkout => {
                            checkout(&mut catalogue, &mut cart, &valid_payment(), today()).map(|_| ())
                        }
                    };

                    if result.is_err() {
                        prop_assert_eq!(&catalogue, &catalogue_before);
                        prop_assert_eq!(&cart, &cart_before);
                    }
                    // A successful add never leaves more in the cart than on the shelf
                    if let (Op::Add(p, _), Ok(())) = (&op, &result) {
                        let held = cart.quantity_of(ids[*p]).unwrap_or(0);
                        prop_assert!(held <= catalogue.get(ids[*p]).unwrap().stock());
                    }
                    for product in catalogue.products() {
                        prop_assert!(product.stock() >= 0);
                    }
                    for entry in cart.entries() {
                        prop_assert!(entry.quantity >= 1);
                    }
                }
            }

            /// Property: a successful checkout debits exactly the cart
            /// quantities.
            #[test]
            fn checkout_debits_exactly(qa in 0i64..4, qb in 0i64..4) {
                let mut catalogue = catalogue();
                let mut cart = Cart::new();
                if qa > 0 {
                    cart.add_item("A", qa, &catalogue).unwrap();
                }
                if qb > 0 {
                    cart.add_item("B", qb, &catalogue).unwrap();
                }

                let result = checkout(&mut catalogue, &mut cart, &valid_payment(), today());
                if qa + qb == 0 {
                    prop_assert_eq!(result, Err(CoreError::EmptyCart));
                } else {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(catalogue.get("A").unwrap().stock(), 3 - qa);
                    prop_assert_eq!(catalogue.get("B").unwrap().stock(), 3 - qb);
                    prop_assert_eq!(catalogue.get("C").unwrap().stock(), 3);
                    prop_assert!(cart.is_empty());
                }
            }
        }
    }
}
