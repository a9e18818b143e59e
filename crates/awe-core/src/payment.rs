//! # Payment Details
//!
//! Syntactic parsing of the four card strings typed at checkout. Nothing here
//! talks to a payment network: a well-formed, unexpired card is accepted.
//!
//! ## Parsing Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RawPaymentDetails (untrusted text)                                     │
//! │       │                                                                 │
//! │       ├── card_number   strip ' ' and '-' → exactly 16 digits          │
//! │       ├── expiry_month  integer in 1..=12                              │
//! │       ├── expiry_year   integer > 0 (taken literally, "25" is year 25) │
//! │       ├── (month, year) ≥ today's (month, year)    else ExpiredCard    │
//! │       └── security_code exactly 3 digits                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentDetails { last four digits, month, year }                       │
//! │  The full number and the security code are dropped here.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Local};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Digits in a card number once separators are removed.
pub const CARD_NUMBER_DIGITS: usize = 16;

/// Digits in a card security code.
pub const SECURITY_CODE_DIGITS: usize = 3;

/// Names the payment field a format error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentField {
    CardNumber,
    ExpiryMonth,
    ExpiryYear,
    SecurityCode,
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentField::CardNumber => "card number",
            PaymentField::ExpiryMonth => "expiry month",
            PaymentField::ExpiryYear => "expiry year",
            PaymentField::SecurityCode => "security code",
        };
        f.write_str(label)
    }
}

/// Card details exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPaymentDetails {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub security_code: String,
}

impl RawPaymentDetails {
    pub fn new(
        card_number: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        security_code: impl Into<String>,
    ) -> Self {
        RawPaymentDetails {
            card_number: card_number.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            security_code: security_code.into(),
        }
    }
}

// =============================================================================
// Calendar Month
// =============================================================================

/// A (year, month) pair, ordered chronologically.
///
/// Passed into checkout instead of read from the clock inside it, so expiry
/// decisions are reproducible in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    // Field order matters: derived Ord compares year first.
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Returns `None` unless `month` is in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(CalendarMonth { year, month })
    }

    /// The month of the given date.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        CalendarMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month on the local clock.
    pub fn current() -> Self {
        CalendarMonth::from_date(&Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

// =============================================================================
// Validated Payment Details
// =============================================================================

/// Card details that passed every syntactic check.
///
/// Only the last four digits survive parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    card_last_four: String,
    expiry: CalendarMonth,
}

impl PaymentDetails {
    /// Parses raw card details against the current month.
    ///
    /// ## Example
    /// ```rust
    /// use awe_core::{CalendarMonth, CoreError, PaymentDetails, RawPaymentDetails};
    ///
    /// let today = CalendarMonth::new(2024, 6).unwrap();
    ///
    /// let ok = RawPaymentDetails::new("4111-1111 1111-1111", "6", "2024", "123");
    /// assert_eq!(PaymentDetails::parse(&ok, today).unwrap().card_last_four(), "1111");
    ///
    /// let expired = RawPaymentDetails::new("4111111111111111", "5", "2024", "123");
    /// assert_eq!(
    ///     PaymentDetails::parse(&expired, today),
    ///     Err(CoreError::ExpiredCard { month: 5, year: 2024 })
    /// );
    /// ```
    pub fn parse(raw: &RawPaymentDetails, today: CalendarMonth) -> CoreResult<Self> {
        let digits = parse_card_number(&raw.card_number)?;
        let month = parse_expiry_month(&raw.expiry_month)?;
        let year = parse_expiry_year(&raw.expiry_year)?;

        let expiry = CalendarMonth { year, month };
        if expiry < today {
            return Err(CoreError::ExpiredCard { month, year });
        }

        parse_security_code(&raw.security_code)?;

        Ok(PaymentDetails {
            card_last_four: digits[CARD_NUMBER_DIGITS - 4..].to_string(),
            expiry,
        })
    }

    pub fn card_last_four(&self) -> &str {
        &self.card_last_four
    }

    pub fn expiry(&self) -> CalendarMonth {
        self.expiry
    }
}

fn parse_card_number(text: &str) -> CoreResult<String> {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if digits.is_empty() {
        return Err(CoreError::malformed(PaymentField::CardNumber, "is required"));
    }

    if digits.len() != CARD_NUMBER_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::malformed(
            PaymentField::CardNumber,
            format!("must be exactly {} digits", CARD_NUMBER_DIGITS),
        ));
    }

    Ok(digits)
}

fn parse_expiry_month(text: &str) -> CoreResult<u32> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| {
            CoreError::malformed(PaymentField::ExpiryMonth, "must be a number from 1 to 12")
        })
}

fn parse_expiry_year(text: &str) -> CoreResult<i32> {
    text.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| *y > 0)
        .ok_or_else(|| CoreError::malformed(PaymentField::ExpiryYear, "must be a positive year"))
}

fn parse_security_code(text: &str) -> CoreResult<()> {
    let code = text.trim();

    if code.len() != SECURITY_CODE_DIGITS || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::malformed(
            PaymentField::SecurityCode,
            format!("must be exactly {} digits", SECURITY_CODE_DIGITS),
        ));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june_2024() -> CalendarMonth {
        CalendarMonth::new(2024, 6).unwrap()
    }

    fn raw(card: &str, month: &str, year: &str, cvv: &str) -> RawPaymentDetails {
        RawPaymentDetails::new(card, month, year, cvv)
    }

    fn field_of(err: CoreError) -> PaymentField {
        match err {
            CoreError::MalformedPaymentField { field, .. } => field,
            other => panic!("expected MalformedPaymentField, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_separators() {
        let details =
            PaymentDetails::parse(&raw("4111 1111-1111 2345", "12", "2030", "999"), june_2024())
                .unwrap();
        assert_eq!(details.card_last_four(), "2345");
        assert_eq!(details.expiry(), CalendarMonth::new(2030, 12).unwrap());
    }

    #[test]
    fn test_card_number_rules() {
        let today = june_2024();
        for card in ["", "4111 1111 1111 111", "4111 1111 1111 11111", "4111x111111111111", "4111.1111.1111.1111"] {
            let err = PaymentDetails::parse(&raw(card, "1", "2030", "123"), today).unwrap_err();
            assert_eq!(field_of(err), PaymentField::CardNumber, "card {:?}", card);
        }
    }

    #[test]
    fn test_expiry_month_rules() {
        let today = june_2024();
        for month in ["0", "13", "-1", "June", ""] {
            let err =
                PaymentDetails::parse(&raw("4111111111111111", month, "2030", "123"), today)
                    .unwrap_err();
            assert_eq!(field_of(err), PaymentField::ExpiryMonth, "month {:?}", month);
        }
        assert!(PaymentDetails::parse(&raw("4111111111111111", " 7 ", "2030", "123"), today).is_ok());
    }

    #[test]
    fn test_expiry_year_rules() {
        let today = june_2024();
        for year in ["0", "-2030", "20x0", ""] {
            let err = PaymentDetails::parse(&raw("4111111111111111", "1", year, "123"), today)
                .unwrap_err();
            assert_eq!(field_of(err), PaymentField::ExpiryYear, "year {:?}", year);
        }
    }

    #[test]
    fn test_expiry_boundaries() {
        let today = june_2024();
        // Same month is still valid
        assert!(PaymentDetails::parse(&raw("4111111111111111", "6", "2024", "123"), today).is_ok());
        assert_eq!(
            PaymentDetails::parse(&raw("4111111111111111", "5", "2024", "123"), today),
            Err(CoreError::ExpiredCard { month: 5, year: 2024 })
        );
        // Later month in an earlier year is expired
        assert_eq!(
            PaymentDetails::parse(&raw("4111111111111111", "12", "2023", "123"), today),
            Err(CoreError::ExpiredCard { month: 12, year: 2023 })
        );
        // Earlier month in a later year is fine
        assert!(PaymentDetails::parse(&raw("4111111111111111", "1", "2025", "123"), today).is_ok());
        // Two-digit years are taken literally
        assert!(matches!(
            PaymentDetails::parse(&raw("4111111111111111", "1", "25", "123"), today),
            Err(CoreError::ExpiredCard { year: 25, .. })
        ));
    }

    #[test]
    fn test_security_code_rules() {
        let today = june_2024();
        for cvv in ["", "12", "1234", "12a"] {
            let err = PaymentDetails::parse(&raw("4111111111111111", "1", "2030", cvv), today)
                .unwrap_err();
            assert_eq!(field_of(err), PaymentField::SecurityCode, "cvv {:?}", cvv);
        }
    }

    #[test]
    fn test_calendar_month() {
        assert!(CalendarMonth::new(2024, 0).is_none());
        assert!(CalendarMonth::new(2024, 13).is_none());
        assert!(CalendarMonth::new(2023, 12).unwrap() < CalendarMonth::new(2024, 1).unwrap());

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CalendarMonth::from_date(&date), CalendarMonth::new(2024, 2).unwrap());
        assert_eq!(CalendarMonth::new(2024, 2).unwrap().to_string(), "02/2024");
    }

    #[test]
    fn test_field_display() {
        assert_eq!(PaymentField::CardNumber.to_string(), "card number");
        assert_eq!(PaymentField::SecurityCode.to_string(), "security code");
    }
}
