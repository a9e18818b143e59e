//! # Sample Catalogue
//!
//! The fixed three-product data set used when no usable catalogue snapshot
//! exists. Identifiers are durable: carts saved against them stay valid
//! across reseeds.

use crate::money::Money;
use crate::types::{Category, Product};

/// (UPC, name, description, price in cents, category, stock)
const SAMPLE: &[(&str, &str, &str, i64, Category, i64)] = &[
    (
        "000000001111",
        "Laptop X1",
        "High performance laptop",
        129999,
        Category::Computers,
        5,
    ),
    (
        "000000002222",
        "Smart TV 55\"",
        "4K UHD Smart TV",
        89999,
        Category::Tvs,
        0,
    ),
    (
        "000000003333",
        "Bluetooth Speaker",
        "Portable speaker",
        7999,
        Category::Audio,
        10,
    ),
];

/// Builds the sample products, in display order.
pub fn sample_products() -> Vec<Product> {
    SAMPLE
        .iter()
        .filter_map(|&(upc, name, description, cents, category, stock)| {
            Product::new(upc, name, description, Money::from_cents(cents), category, stock).ok()
        })
        .collect()
}
