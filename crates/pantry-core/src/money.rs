//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    11.99 * 0.1 = 1.1990000000000001  ❌                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1199 cents * 1000 bps = 119.9 cents → half-up → 120 cents ($1.20)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pantry_core::money::Money;
//!
//! let price: Money = "11.99".parse().unwrap();
//! assert_eq!(price.cents(), 1199);
//!
//! // 10% discount, rounded half-up to the cent
//! assert_eq!(price.percentage(1000).cents(), 120);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never panics on underflow of unsigned
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use pantry_core::money::Money;
    ///
    /// let price = Money::from_cents(299); // $2.99
    /// assert_eq!(price.cents(), 299);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, clamping at the i64 bounds instead of overflowing.
    /// Used for report totals over caller-supplied prices.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the cent.
    ///
    /// Half-up means half away from zero, so `-0.5` cents rounds to `-1`.
    ///
    /// ## Example
    /// ```rust
    /// use pantry_core::money::Money;
    ///
    /// // $2.99 at 10% = $0.299 → $0.30
    /// assert_eq!(Money::from_cents(299).percentage(1000).cents(), 30);
    /// // $0.05 at 10% = $0.005 → $0.01
    /// assert_eq!(Money::from_cents(5).percentage(1000).cents(), 1);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 so large prices cannot overflow before the division
        let raw = self.0 as i128 * bps as i128;
        let rounded = (raw.abs() + 5000) / 10000;
        let cents = if raw < 0 { -rounded } else { rounded };
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a plain decimal amount such as `11.99`, `3` or `2.5`.
///
/// More than two fraction digits are rounded half-up to the cent. Currency
/// symbols, grouping separators and exponents are rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };

        let mut frac_digits = fraction.bytes().map(|b| (b - b'0') as i64);
        let tenths = frac_digits.next().unwrap_or(0);
        let hundredths = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().is_some_and(|d| d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a plain US format.
///
/// ## Note
/// This is for debugging and logs. Reports go through
/// [`ResourceFormatter::format_money`](crate::format::ResourceFormatter::format_money).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1199);
        assert_eq!(money.cents(), 1199);
        assert_eq!(money.dollars(), 11);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1199).to_string(), "$11.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!("11.99".parse::<Money>().unwrap().cents(), 1199);
        assert_eq!("3".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("2.5".parse::<Money>().unwrap().cents(), 250);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!(" 1.10 ".parse::<Money>().unwrap().cents(), 110);
        assert_eq!("-4.20".parse::<Money>().unwrap().cents(), -420);
    }

    #[test]
    fn test_parse_rounds_extra_fraction_digits() {
        assert_eq!("1.005".parse::<Money>().unwrap().cents(), 101);
        assert_eq!("1.004".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("0.999".parse::<Money>().unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("Two".parse::<Money>().is_err());
        assert!("$1.00".parse::<Money>().is_err());
        assert!("1,00".parse::<Money>().is_err());
        assert!("1e3".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // $11.99 at 10% = $1.199 → $1.20
        assert_eq!(Money::from_cents(1199).percentage(1000).cents(), 120);
        // $0.15 at 10% = $0.015 → $0.02
        assert_eq!(Money::from_cents(15).percentage(1000).cents(), 2);
        // $0.14 at 10% = $0.014 → $0.01
        assert_eq!(Money::from_cents(14).percentage(1000).cents(), 1);
        // negative amounts round away from zero
        assert_eq!(Money::from_cents(-15).percentage(1000).cents(), -2);
    }

    #[test]
    fn test_saturating_add() {
        let a = Money::from_cents(120);
        assert_eq!(a.saturating_add(Money::from_cents(30)).cents(), 150);
        assert_eq!(Money::zero().saturating_add(Money::zero()), Money::zero());

        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!(huge.saturating_add(Money::from_cents(10)).cents(), i64::MAX);
        assert_eq!(
            Money::from_cents(i64::MIN).saturating_add(Money::from_cents(-1)).cents(),
            i64::MIN
        );
    }
}
