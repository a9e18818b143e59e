//! Browse screen: category filter, price sort, name search, full list.
//!
//! ```text
//! pick a list ──► numbered products ──► details ──► "Add to cart? (y/n)"
//!                        ▲                                  │ y
//!                        │                                  ▼
//!                        └──────────── quantity ──► Session::add_to_cart
//! ```

use std::io::{BufRead, Write};

use awe_core::validation::{parse_positive_int, validate_search_query};
use awe_core::{Category, Product};

use super::{pick_product, recover};
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::state::Session;

const PICK_PROMPT: &str = "Enter product number to view details or 0 to go back: ";

/// Which list the user asked for. Re-evaluated on every pass so stock and
/// availability are always current.
#[derive(Debug, Clone)]
enum Listing {
    Category(Category),
    ByPrice { ascending: bool },
    Search(String),
    All,
}

impl Listing {
    fn products<'a>(&self, session: &'a Session) -> Vec<&'a Product> {
        let catalogue = session.catalogue();
        match self {
            Listing::Category(category) => catalogue.filter_by_category(*category),
            Listing::ByPrice { ascending } => catalogue.filter_by_price_order(*ascending),
            Listing::Search(text) => catalogue.search_by_name(text),
            Listing::All => catalogue.products().iter().collect(),
        }
    }

    fn empty_message(&self) -> String {
        match self {
            Listing::Category(category) => format!("No products found in category: '{}'.", category),
            Listing::Search(text) => format!("No products found matching name: '{}'.", text),
            _ => "No products available.".to_string(),
        }
    }
}

pub(super) fn run<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    loop {
        io.blank()?;
        io.say("1. Filter by category")?;
        io.say("2. Sort by price")?;
        io.say("3. Search by product name")?;
        io.say("4. View all products")?;
        io.say("0. Back to main menu")?;

        let listing = match io.choose("Choose option (0-4): ", 0..=4)? {
            0 => return Ok(()),
            1 => match choose_category(io)? {
                Some(category) => Listing::Category(category),
                None => continue,
            },
            2 => match choose_price_order(io)? {
                Some(ascending) => Listing::ByPrice { ascending },
                None => continue,
            },
            3 => Listing::Search(
                io.ask_with("Enter product name to search: ", validate_search_query)?,
            ),
            _ => Listing::All,
        };

        browse_listing(session, io, &listing)?;
    }
}

fn choose_category<R: BufRead, W: Write>(io: &mut Prompter<R, W>) -> AppResult<Option<Category>> {
    io.blank()?;
    for (i, category) in Category::ALL.iter().enumerate() {
        io.say(format!("{}. {}", i + 1, category))?;
    }
    io.say("0. Back")?;

    let choice = io.choose("Select category (0-3): ", 0..=Category::ALL.len())?;
    Ok(choice.checked_sub(1).map(|i| Category::ALL[i]))
}

fn choose_price_order<R: BufRead, W: Write>(io: &mut Prompter<R, W>) -> AppResult<Option<bool>> {
    io.blank()?;
    io.say("1. Low to high")?;
    io.say("2. High to low")?;
    io.say("0. Back")?;

    Ok(match io.choose("Select price sort option (0-2): ", 0..=2)? {
        1 => Some(true),
        2 => Some(false),
        _ => None,
    })
}

fn browse_listing<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
    listing: &Listing,
) -> AppResult<()> {
    loop {
        let products = listing.products(session);
        if products.is_empty() {
            io.say(listing.empty_message())?;
            return Ok(());
        }

        io.blank()?;
        let picked = pick_product(io, &products, PICK_PROMPT)?;
        match picked {
            Some(id) => product_details(session, io, &id)?,
            None => return Ok(()),
        }
    }
}

/// Shows one product and offers to add it to the cart.
fn product_details<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
    product_id: &str,
) -> AppResult<()> {
    let (name, stock) = {
        let Some(product) = session.catalogue().get(product_id) else {
            return Ok(());
        };
        io.blank()?;
        io.say(format!("UPC: {}", product.identifier()))?;
        io.say(format!("Name: {}", product.name()))?;
        io.say(format!("Description: {}", product.description()))?;
        io.say(format!("Price: {}", product.price()))?;
        io.say(format!("Category: {}", product.category()))?;
        io.say(format!("Availability: {}", product.availability()))?;
        (product.name().to_string(), product.stock())
    };

    if stock <= 0 {
        io.say("Sorry, this product is out of stock and cannot be added.")?;
        return Ok(());
    }

    if let Some(in_cart) = session.cart().quantity_of(product_id) {
        io.say(format!("Already in your cart: {}", in_cart))?;
    }

    if !io.confirm("Add this product to cart? (y/n): ")? {
        return Ok(());
    }

    let quantity = io.ask_with("Quantity to add: ", |text| parse_positive_int("quantity", text))?;
    if let Some(total) = recover(io, session.add_to_cart(product_id, quantity))? {
        io.say(format!("Added {} x {} to cart ({} in cart).", quantity, name, total))?;
    }
    Ok(())
}
