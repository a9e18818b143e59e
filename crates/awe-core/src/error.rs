//! # Error Types
//!
//! Domain-specific error types for awe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  awe-core errors (this file)                                           │
//! │  ├── CoreError        - Catalogue / cart / checkout outcomes           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  awe-core::storage                                                     │
//! │  └── StorageError     - Fatal write failures reported by a backend     │
//! │                                                                         │
//! │  awe-store errors (separate crate)                                     │
//! │  └── StoreError       - File / JSON failures, mapped to StorageError   │
//! │                                                                         │
//! │  awe-shop errors (in app)                                              │
//! │  └── AppError         - What ends the process                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (identifier, name, quantities)
//! 3. Every variant except `Storage` is recoverable: the shell reports it and
//!    the catalogue and cart are left exactly as they were

use thiserror::Error;

use crate::payment::PaymentField;
use crate::storage::StorageError;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No product with this identifier exists in the catalogue.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with this identifier already exists.
    #[error("A product with identifier {0} already exists")]
    DuplicateIdentifier(String),

    /// Requested quantity exceeds the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 3 × Laptop X1, stock is 5
    ///      │
    ///      ▼
    /// Add 3 more → total requested 6
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Laptop X1", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Shell shows: "Insufficient stock for Laptop X1: available 5, requested 6"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Quantity or stock value is out of range (non-positive quantity,
    /// negative stock).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(String),

    /// The cart's total does not fit in a `Money` value.
    #[error("Cart total is too large to price")]
    TotalTooLarge,

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Card expiry (month, year) is before the current month.
    #[error("Card expired {month:02}/{year}")]
    ExpiredCard { month: u32, year: i32 },

    /// A payment field failed its syntactic check.
    #[error("Invalid {field}: {reason}")]
    MalformedPaymentField { field: PaymentField, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage could not be written. The only non-recoverable outcome.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CoreError {
    /// Creates a MalformedPaymentField error.
    pub fn malformed(field: PaymentField, reason: impl Into<String>) -> Self {
        CoreError::MalformedPaymentField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true when the error leaves the session usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CoreError::Storage(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. not a number, too many decimal places).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. username already taken).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Laptop X1".to_string(),
            available: 5,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Laptop X1: available 5, requested 6"
        );

        assert_eq!(
            CoreError::TotalTooLarge.to_string(),
            "Cart total is too large to price"
        );
        assert!(CoreError::TotalTooLarge.is_recoverable());

        let err = CoreError::ExpiredCard { month: 1, year: 2020 };
        assert_eq!(err.to_string(), "Card expired 01/2020");

        let err = CoreError::malformed(PaymentField::SecurityCode, "must be exactly 3 digits");
        assert_eq!(
            err.to_string(),
            "Invalid security code: must be exactly 3 digits"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock cannot be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "upc".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_recoverable());
    }

    #[test]
    fn test_storage_error_is_fatal() {
        let err: CoreError = StorageError::new("disk full").into();
        assert!(!err.is_recoverable());
    }
}
