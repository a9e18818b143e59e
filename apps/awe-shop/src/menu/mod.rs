//! # Menus
//!
//! The interactive screens. Menus only read from the session and call its
//! operations; they never touch the catalogue or cart directly.
//!
//! ## Screen Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Welcome                                                                │
//! │  ├── 1. Login ──► Main menu                                            │
//! │  │               ├── 1. Browse products     (browse.rs)               │
//! │  │               │     category / price sort / search / all           │
//! │  │               │     └── details ──► add quantity to cart           │
//! │  │               ├── 2. View cart           (cart.rs)                 │
//! │  │               │     remove / change quantity / checkout            │
//! │  │               ├── 3. Manage catalogue    (admin.rs)                │
//! │  │               │     add product / set stock / remove product       │
//! │  │               └── 4. Save & exit ──► back to Welcome               │
//! │  ├── 2. Signup                                                         │
//! │  └── 3. Exit                                                           │
//! │                                                                         │
//! │  End of input at any prompt exits cleanly.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod admin;
mod browse;
mod cart;

use std::io::{BufRead, Write};

use awe_core::validation::validate_password;
use awe_core::Product;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;
use crate::state::Session;

/// Runs the shell until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    match welcome(session, io) {
        Err(AppError::InputClosed) => {
            info!("Input closed, leaving");
            session.save_all()?;
            io.blank()?;
            io.say("Goodbye!")?;
            Ok(())
        }
        other => other,
    }
}

fn welcome<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<()> {
    loop {
        io.blank()?;
        io.say(format!("Welcome to {}!", session.config().store_name))?;
        io.say("1. Login")?;
        io.say("2. Signup")?;
        io.say("3. Exit")?;

        match io.choose("Select an option: ", 1..=3)? {
            1 => {
                if login(session, io)? {
                    main_menu(session, io)?;
                }
            }
            2 => signup(session, io)?,
            _ => {
                io.say("Goodbye!")?;
                return Ok(());
            }
        }
    }
}

fn login<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<bool> {
    io.blank()?;
    io.say("--- Login ---")?;

    for _ in 0..session.config().max_login_attempts {
        let username = io.ask("Username: ")?;
        let password = io.ask("Password: ")?;

        if session.sign_in(&username, &password) {
            io.say(format!("Welcome back, {}!", username.trim()))?;
            return Ok(true);
        }
        io.say("Invalid username or password. Try again.")?;
    }

    io.say("Too many failed attempts.")?;
    Ok(false)
}

fn signup<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<()> {
    io.blank()?;
    io.say("--- Signup ---")?;

    let username = io.ask_with("Enter a new username: ", |text| {
        session
            .accounts()
            .check_new_username(text)
            .map(|_| text.trim().to_string())
    })?;

    let password = loop {
        let password = io.ask("Enter a password: ")?;
        let confirm = io.ask("Confirm password: ")?;

        if password != confirm {
            io.say("Passwords do not match. Try again.")?;
        } else if let Err(e) = validate_password(&password) {
            io.say(e)?;
        } else {
            break password;
        }
    };

    if let Some(()) = recover(io, session.sign_up(&username, &password))? {
        io.say("Signup successful! Please login now.")?;
    }
    Ok(())
}

fn main_menu<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    loop {
        let cart = session.cart();
        let total = match cart.total_price(session.catalogue()) {
            Ok(total) => total.to_string(),
            Err(_) => "total too large".to_string(),
        };
        let summary = format!("Cart: {} item(s), {}", cart.total_quantity(), total);

        io.blank()?;
        io.say(format!("--- {} Catalogue ---", session.config().store_name))?;
        io.say(summary)?;
        io.say("1. Browse products")?;
        io.say("2. View cart")?;
        io.say("3. Manage catalogue")?;
        io.say("4. Save & exit")?;

        match io.choose("Enter your choice (1-4): ", 1..=4)? {
            1 => browse::run(session, io)?,
            2 => cart::run(session, io)?,
            3 => admin::run(session, io)?,
            _ => {
                session.sign_out()?;
                io.say("Data saved. Signed out.")?;
                return Ok(());
            }
        }
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Prints a recoverable error and yields `None`; passes anything else up.
fn recover<T, R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
    result: AppResult<T>,
) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            io.say(e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// One numbered listing line.
fn list_line(index: usize, product: &Product) -> String {
    format!(
        "{}. {} - {} ({}) - {}",
        index,
        product.name(),
        product.price(),
        product.category(),
        product.availability()
    )
}

fn print_products<R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
    products: &[&Product],
) -> AppResult<()> {
    for (i, product) in products.iter().enumerate() {
        io.say(list_line(i + 1, product))?;
    }
    Ok(())
}

/// Numbered product list with a "0 to go back" picker.
///
/// Returns the picked product's identifier.
fn pick_product<R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
    products: &[&Product],
    prompt: &str,
) -> AppResult<Option<String>> {
    if products.is_empty() {
        io.say("No products to display.")?;
        return Ok(None);
    }

    print_products(io, products)?;
    let choice = io.choose(prompt, 0..=products.len())?;
    Ok(choice
        .checked_sub(1)
        .map(|i| products[i].identifier().to_string()))
}
