//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell prompt loop (awe-shop)                                 │
//! │  ├── Reads a line, calls a parser from THIS MODULE                     │
//! │  └── On Err: prints the message and asks again                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors / operations (awe-core)                  │
//! │  ├── Product::new re-validates every field                             │
//! │  └── Cart / Catalogue check quantities against stock                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage records (awe-store)                                  │
//! │  └── Records failing validation mark the whole file as corrupt         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsers return `Result` instead of panicking or looping; the retry loop is
//! owned by the shell, never by the core.
//!
//! ## Usage
//! ```rust
//! use awe_core::validation::{parse_positive_int, validate_upc};
//!
//! assert_eq!(parse_positive_int("quantity", " 3 ").unwrap(), 3);
//! assert!(parse_positive_int("quantity", "0").is_err());
//! assert!(validate_upc("000000001111").is_ok());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Length of a UPC-A code.
pub const UPC_LENGTH: usize = 12;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens and underscores
pub fn validate_identifier(identifier: &str) -> ValidationResult<()> {
    let identifier = identifier.trim();

    if identifier.is_empty() {
        return Err(ValidationError::Required {
            field: "identifier".to_string(),
        });
    }

    if identifier.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "identifier".to_string(),
            max: 50,
        });
    }

    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "identifier".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a UPC entered for a new product: exactly 12 digits.
///
/// ## Example
/// ```rust
/// use awe_core::validation::validate_upc;
///
/// assert!(validate_upc("000000001111").is_ok());
/// assert!(validate_upc("1111").is_err());
/// assert!(validate_upc("00000000111A").is_err());
/// ```
pub fn validate_upc(upc: &str) -> ValidationResult<()> {
    let upc = upc.trim();

    if upc.is_empty() {
        return Err(ValidationError::Required {
            field: "UPC".to_string(),
        });
    }

    if upc.len() != UPC_LENGTH || !upc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "UPC".to_string(),
            reason: format!("must be exactly {} digits", UPC_LENGTH),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a name search query and returns it trimmed.
///
/// Empty is allowed (matches every product).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a username for signup.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.chars().count() > 64 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 64,
        });
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a password for signup. Only emptiness is rejected.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Parsers & Validators
// =============================================================================

/// Parses an integer typed at a prompt.
fn parse_int(field: &str, text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    text.parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Parses a strictly positive integer (quantities, menu selections).
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shell: "Quantity to add: "                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_positive_int("quantity", input) ← THIS FUNCTION                 │
/// │       │                                                                 │
/// │       ├── "abc" / "2.5" → InvalidFormat  → shell asks again            │
/// │       ├── "0" / "-1"    → MustBePositive → shell asks again            │
/// │       └── "3"           → Ok(3)          → Cart::add_item              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_positive_int(field: &str, text: &str) -> ValidationResult<i64> {
    let value = parse_int(field, text)?;
    validate_positive(field, value)?;
    Ok(value)
}

/// Parses a non-negative integer (stock levels).
pub fn parse_non_negative_int(field: &str, text: &str) -> ValidationResult<i64> {
    let value = parse_int(field, text)?;

    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
