//! # Money Module
//!
//! Provides the `Money` type for the amounts that appear in the daily report.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUT PRICES ARE FREE-FORM NUMBERS                                     │
//! │                                                                         │
//! │  unit_price column:   10.0   15.5   0.333                               │
//! │  quantity column:        2      1       3                               │
//! │                                                                         │
//! │  Line totals and sums are kept as f64 while aggregating, so no cent    │
//! │  is lost per row. The finished sum is rounded ONCE into Money:          │
//! │                                                                         │
//! │    20.0 + 15.5 + 0.999 = 36.499  ──►  Money(3650) = $36.50             │
//! │                                                                         │
//! │  From then on, every amount is integer cents.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use datashop_core::money::Money;
//!
//! let total = Money::from_amount(36.499);
//! assert_eq!(total.cents(), 3650);
//! assert_eq!(total.to_string(), "$36.50");
//!
//! let big = Money::from_cents(123_456_789);
//! assert_eq!(big.to_string(), "$1,234,567.89");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Serialization
/// Serializes as a JSON number in currency units with at most two decimals
/// (`Money::from_cents(6500)` → `65.0`, `Money::from_cents(333)` → `3.33`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a currency amount to the nearest cent.
    ///
    /// Rounds the exact binary value of `amount`, ties to even. `1.115` is
    /// stored as `1.11499...` and becomes 111 cents, `0.125` is an exact tie
    /// and becomes 12. Non-finite amounts become zero.
    ///
    /// ## Example
    /// ```rust
    /// use datashop_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(65.0).cents(), 6500);
    /// assert_eq!(Money::from_amount(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Money::from_amount(-5.5551).cents(), -556);
    /// assert_eq!(Money::from_amount(1.115).cents(), 111);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // `{:.2}` rounds the exact decimal expansion, so no intermediate
        // product can move a value across a half.
        let cents = format!("{amount:.2}").replace('.', "");
        match cents.parse() {
            Ok(cents) => Money(cents),
            Err(_) => Money((amount * 100.0) as i64),
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in currency units (e.g. `12.5` for 1250 cents).
    #[inline]
    pub fn to_amount(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Formats the value with two decimals and no currency symbol.
    ///
    /// Used for the tabular side-file (`70.00`, `-3.50`).
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Console format: `$` prefix, comma thousands separators, two decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_amount())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_amount_rounds_once() {
        assert_eq!(Money::from_amount(36.499).cents(), 3650);
        assert_eq!(Money::from_amount(0.004).cents(), 0);
        assert_eq!(Money::from_amount(0.005).cents(), 1);
        assert_eq!(Money::from_amount(f64::NAN).cents(), 0);
        assert_eq!(Money::from_amount(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(123_450)), "$1,234.50");
        assert_eq!(format!("{}", Money::from_cents(100_000_000)), "$1,000,000.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(7000).to_plain_string(), "70.00");
        assert_eq!(Money::from_cents(-350).to_plain_string(), "-3.50");
        assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
    }

    #[test]
    fn test_from_amount_uses_exact_binary_value() {
        // 1.115 is 1.1149999999999999911182158029987... in binary
        assert_eq!(Money::from_amount(1.115).cents(), 111);
        assert_eq!(Money::from_amount(2.675).cents(), 267);
        assert_eq!(Money::from_amount(-1.115).cents(), -111);
    }

    #[test]
    fn test_from_amount_exact_ties_go_to_even() {
        assert_eq!(Money::from_amount(0.125).cents(), 12);
        assert_eq!(Money::from_amount(0.375).cents(), 38);
        assert_eq!(Money::from_amount(-0.125).cents(), -12);
    }

    #[test]
    fn test_from_amount_negative_zero() {
        assert_eq!(Money::from_amount(-0.001).cents(), 0);
        assert!(Money::from_amount(-0.001).is_zero());
    }

    #[test]
    fn test_serializes_as_amount() {
        assert_eq!(serde_json::to_string(&Money::from_cents(6500)).unwrap(), "65.0");
        assert_eq!(serde_json::to_string(&Money::from_cents(333)).unwrap(), "3.33");
        let back: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(back.cents(), 1250);
    }
}
