//! Cart screen: review lines, remove, change quantity, checkout.

use std::io::{BufRead, Write};

use awe_core::validation::parse_non_negative_int;
use awe_core::{CalendarMonth, Product, RawPaymentDetails, Receipt};

use super::recover;
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::state::Session;

pub(super) fn run<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    loop {
        show_cart(session, io)?;

        io.blank()?;
        io.say("1. Remove item")?;
        io.say("2. Change quantity")?;
        io.say("3. Checkout")?;
        io.say("0. Back")?;

        match io.choose("Select an option: ", 0..=3)? {
            0 => return Ok(()),
            1 => {
                if let Some(id) = pick_line(session, io, "Enter item number to remove (0 to cancel): ")? {
                    if recover(io, session.remove_from_cart(&id))?.is_some() {
                        io.say("Product removed from cart.")?;
                    }
                }
            }
            2 => {
                if let Some(id) = pick_line(session, io, "Enter item number to change (0 to cancel): ")? {
                    let quantity = io.ask_with("New quantity (0 removes the item): ", |text| {
                        parse_non_negative_int("quantity", text)
                    })?;
                    if recover(io, session.set_cart_quantity(&id, quantity))?.is_some() {
                        io.say("Cart updated.")?;
                    }
                }
            }
            _ => {
                if checkout(session, io)? {
                    return Ok(());
                }
            }
        }
    }
}

fn show_cart<R: BufRead, W: Write>(session: &Session, io: &mut Prompter<R, W>) -> AppResult<()> {
    io.blank()?;
    if session.cart().is_empty() {
        io.say("Cart is empty.")?;
        return Ok(());
    }

    io.say("--- Your Cart ---")?;
    for (i, (product, quantity)) in listed(session).into_iter().enumerate() {
        let line_total = match product.price().multiply_quantity(quantity) {
            Some(total) => total.to_string(),
            None => "too large".to_string(),
        };
        io.say(format!(
            "{}. {} - {} x {} = {}",
            i + 1,
            product.name(),
            product.price(),
            quantity,
            line_total
        ))?;
    }

    match session.cart().total_price(session.catalogue()) {
        Ok(total) => io.say(format!("Total: {}", total))?,
        Err(e) => io.say(e)?,
    }
    Ok(())
}

/// Cart entries whose product is still listed, in cart order.
fn listed(session: &Session) -> Vec<(&Product, i64)> {
    let catalogue = session.catalogue();
    session
        .cart()
        .entries()
        .iter()
        .filter_map(|entry| {
            catalogue
                .get(&entry.product_id)
                .map(|product| (product, entry.quantity))
        })
        .collect()
}

/// Picks a cart line by its displayed number.
fn pick_line<R: BufRead, W: Write>(
    session: &Session,
    io: &mut Prompter<R, W>,
    prompt: &str,
) -> AppResult<Option<String>> {
    let ids: Vec<String> = listed(session)
        .into_iter()
        .map(|(product, _)| product.identifier().to_string())
        .collect();

    if ids.is_empty() {
        io.say("Cart is empty.")?;
        return Ok(None);
    }

    let choice = io.choose(prompt, 0..=ids.len())?;
    Ok(choice.checked_sub(1).map(|i| ids[i].clone()))
}

/// Returns true when an order was placed.
fn checkout<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<bool> {
    // Fail on the cart before asking for card details
    if recover(io, session.validate_cart())?.is_none() {
        io.say("Checkout aborted.")?;
        return Ok(false);
    }

    io.blank()?;
    io.say("--- Payment ---")?;
    let payment = RawPaymentDetails::new(
        io.ask("Card number (16 digits): ")?,
        io.ask("Expiry month (1-12): ")?,
        io.ask("Expiry year (e.g. 2030): ")?,
        io.ask("Security code (3 digits): ")?,
    );

    match recover(io, session.checkout(&payment, CalendarMonth::current()))? {
        Some(receipt) => {
            print_receipt(session, io, &receipt)?;
            Ok(true)
        }
        None => {
            io.say("Checkout aborted. Your cart has not been changed.")?;
            Ok(false)
        }
    }
}

fn print_receipt<R: BufRead, W: Write>(
    session: &Session,
    io: &mut Prompter<R, W>,
    receipt: &Receipt,
) -> AppResult<()> {
    io.blank()?;
    io.say(format!("=== {} Receipt ===", session.config().store_name))?;
    io.say(format!("Order: {}", receipt.order_id))?;
    io.say(format!(
        "Date: {}",
        receipt.completed_at.format("%Y-%m-%d %H:%M UTC")
    ))?;
    for line in &receipt.lines {
        io.say(format!(
            "  {} - {} x {} = {}",
            line.name, line.unit_price, line.quantity, line.line_total
        ))?;
    }
    io.say(format!("Total: {}", receipt.total))?;
    io.say(format!("Paid with card ending {}", receipt.card_last_four))?;
    io.say("Checkout successful! Thank you for your purchase.")?;
    Ok(())
}
