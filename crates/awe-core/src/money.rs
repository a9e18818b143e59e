//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart total summed in floats drifts by fractions of a cent and must  │
//! │  be rounded "only at the end" to stay correct.                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    129999 + 7999 = 137998 cents, exactly                                │
//! │    Every intermediate sum is already at currency precision, so the     │
//! │    final total never needs rounding                                    │
//! │                                                                         │
//! │  Cents are an i64, so a huge price times a quantity could wrap.        │
//! │  Every operation that can overflow is checked and yields None.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use awe_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic is checked: overflow gives None, never a wrapped total
//! let doubled = price.multiply_quantity(2);              // Some($21.98)
//! let total = price.checked_add(Money::from_cents(500)); // Some($15.99)
//! assert_eq!(total.map(|m| m.cents()), Some(1599));
//! assert_eq!(doubled.map(|m| m.cents()), Some(2198));
//! assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
//!
//! // Parse what a user typed at a prompt
//! let parsed = Money::parse("1299.99").unwrap();
//! assert_eq!(parsed.cents(), 129999);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.line_total ──► Cart.total_price ──► Receipt.total
///
/// EVERY monetary value in the storefront flows through this type
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a user-entered amount such as `"1299.99"`, `"5"`, `"5.5"` or
    /// `"$79.99"`.
    ///
    /// ## Rules
    /// - Optional leading `$`
    /// - Digits with at most one `.` and at most two decimal places
    /// - Negative amounts are rejected
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::money::Money;
    ///
    /// assert_eq!(Money::parse("5.5").unwrap().cents(), 550);
    /// assert!(Money::parse("-1").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(text: &str) -> ValidationResult<Money> {
        let text = text.trim();
        let text = text.strip_prefix('$').unwrap_or(text);

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        if text.starts_with('-') {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid_price("must be a number like 19.99"));
        }

        if fraction.len() > 2 {
            return Err(invalid_price("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid_price("amount is too large"))?
        };

        // "5.5" means 50 cents, not 5
        let minor = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid_price("amount is too large"))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(7999); // $79.99
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.cents(), 23997); // $239.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums line totals into a cart total, or `None` if the running total
    /// overflows.
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::money::Money;
    ///
    /// let lines = [Money::from_cents(1000), Money::from_cents(1550)];
    /// assert_eq!(Money::checked_sum(lines), Some(Money::from_cents(2550)));
    ///
    /// let huge = [Money::from_cents(i64::MAX), Money::from_cents(1)];
    /// assert_eq!(Money::checked_sum(huge), None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }
}

fn invalid_price(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$1299.99` (no thousands separators).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
