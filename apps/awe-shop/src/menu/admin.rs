//! Catalogue management: add products, set stock, remove products.

use std::io::{BufRead, Write};

use awe_core::validation::{parse_non_negative_int, validate_product_name, validate_upc};
use awe_core::{Category, CoreError, Money, Product};

use super::{pick_product, print_products, recover};
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;
use crate::state::Session;

pub(super) fn run<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    loop {
        io.blank()?;
        io.say("--- Manage Catalogue ---")?;
        io.say("1. Add product")?;
        io.say("2. Set stock")?;
        io.say("3. Remove product")?;
        io.say("4. List products")?;
        io.say("0. Back")?;

        match io.choose("Select an option: ", 0..=4)? {
            0 => return Ok(()),
            1 => add_product(session, io)?,
            2 => set_stock(session, io)?,
            3 => remove_product(session, io)?,
            _ => {
                let products: Vec<&Product> = session.catalogue().products().iter().collect();
                if products.is_empty() {
                    io.say("No products to display.")?;
                } else {
                    io.blank()?;
                    print_products(io, &products)?;
                }
            }
        }
    }
}

fn add_product<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<()> {
    io.blank()?;
    io.say("--- New Product ---")?;

    let upc = io.ask_with("UPC (12 digits): ", |text| -> AppResult<String> {
        validate_upc(text)?;
        let upc = text.trim();
        if session.catalogue().contains(upc) {
            return Err(CoreError::DuplicateIdentifier(upc.to_string()).into());
        }
        Ok(upc.to_string())
    })?;
    let name = io.ask_with("Name: ", |text| {
        validate_product_name(text).map(|_| text.trim().to_string())
    })?;
    let description = io.ask("Description: ")?;
    let price = io.ask_with("Price: ", Money::parse)?;
    let category = io.ask_with("Category (Computers, TVs, Audio): ", str::parse::<Category>)?;
    let stock = io.ask_with("Stock: ", |text| parse_non_negative_int("stock", text))?;

    let Some(product) = recover(
        io,
        Product::new(upc, name, description, price, category, stock).map_err(AppError::from),
    )?
    else {
        return Ok(());
    };

    let name = product.name().to_string();
    if recover(io, session.add_product(product))?.is_some() {
        io.say(format!("Added {} to the catalogue.", name))?;
    }
    Ok(())
}

fn set_stock<R: BufRead, W: Write>(session: &mut Session, io: &mut Prompter<R, W>) -> AppResult<()> {
    io.blank()?;
    let picked = {
        let products: Vec<&Product> = session.catalogue().products().iter().collect();
        pick_product(io, &products, "Enter product number to restock (0 to cancel): ")?
    };
    let Some(id) = picked else {
        return Ok(());
    };

    let stock = io.ask_with("New stock level: ", |text| parse_non_negative_int("stock", text))?;
    if recover(io, session.set_stock(&id, stock))?.is_some() {
        io.say(format!("Stock set to {}.", stock))?;
    }
    Ok(())
}

fn remove_product<R: BufRead, W: Write>(
    session: &mut Session,
    io: &mut Prompter<R, W>,
) -> AppResult<()> {
    io.blank()?;
    let picked = {
        let products: Vec<&Product> = session.catalogue().products().iter().collect();
        pick_product(io, &products, "Enter product number to remove (0 to cancel): ")?
    };
    let Some(id) = picked else {
        return Ok(());
    };

    if !io.confirm("Remove this product from the catalogue? (y/n): ")? {
        return Ok(());
    }

    if let Some(removed) = recover(io, session.remove_product(&id))? {
        io.say(format!("Removed {} from the catalogue.", removed.name()))?;
    }
    Ok(())
}
