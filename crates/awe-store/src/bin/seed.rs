//! # Seed Data Writer
//!
//! Writes the sample catalogue to a data directory.
//!
//! ## Usage
//! ```bash
//! # Seed ./data (or $AWE_DATA_DIR)
//! cargo run -p awe-store --bin seed
//!
//! # Seed a specific directory
//! cargo run -p awe-store --bin seed -- --data-dir ~/awe-data
//!
//! # Overwrite an existing catalogue
//! cargo run -p awe-store --bin seed -- --force
//! ```
//!
//! Without `--force` an existing, valid catalogue is left alone. A missing,
//! empty, corrupt or duplicate-identifier one is always replaced.

use std::env;
use std::path::PathBuf;

use awe_core::{CatalogueStorage, LoadError};
use awe_store::FileStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir = env::var("AWE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("AWE Storefront Seed Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <DIR>  Data directory (default: $AWE_DATA_DIR or ./data)");
                println!("  -f, --force           Overwrite an existing catalogue");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let store = FileStore::new(&data_dir);

    println!("AWE Storefront Seed Tool");
    println!("========================");
    println!("Data directory: {}", data_dir.display());
    println!();

    match store.load_catalogue() {
        Ok(existing) if !force => {
            println!("⚠ Catalogue already has {} products", existing.len());
            println!("  Skipping seed. Pass --force to overwrite.");
            return Ok(());
        }
        Ok(_) | Err(LoadError::NotFound) => {}
        Err(LoadError::Corrupt(reason)) => {
            println!("⚠ Existing catalogue is unusable: {}", reason);
        }
    }

    let products = awe_core::seed::sample_products();
    store.save_products(&products)?;

    for product in &products {
        println!(
            "  {}  {:<20} {:>10}  {:<9} stock {}",
            product.identifier(),
            product.name(),
            product.price().to_string(),
            product.category(),
            product.stock()
        );
    }
    println!();
    println!("✓ Wrote {} products to {}", products.len(), store.catalogue_path().display());

    Ok(())
}
