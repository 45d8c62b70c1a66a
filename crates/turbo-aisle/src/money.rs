//! Money type for cart totals.
//!
//! Catalog prices are whole numbers in the store's smallest currency unit,
//! so amounts are plain integers. Fractional inputs are rounded once, on
//! the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a Money value from a fractional amount, rounding to the
    /// nearest unit.
    ///
    /// ```
    /// use turbo_aisle::money::{Money, Currency};
    /// let price = Money::from_decimal(12.6, Currency::USD);
    /// assert_eq!(price.amount, 13);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new(amount.round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Format as a display string (e.g., "$1,299").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol, grouping thousands (e.g., "1,299").
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.amount < 0 {
            grouped.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    /// Multiply by a scalar, saturating at the numeric bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Multiply by a decimal factor, rounding to the nearest unit.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::from_decimal(self.amount as f64 * factor, self.currency)
    }

    /// Sum an iterator of Money values, saturating on overflow.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| {
            Money::new(acc.amount.saturating_add(m.amount), currency)
        })
    }
}

impl Add for Money {
    type Output = Money;

    /// Adds amounts; the left operand's currency wins.
    fn add(self, other: Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(12.6, Currency::USD).amount, 13);
        assert_eq!(Money::from_decimal(12.5, Currency::USD).amount, 13);
        assert_eq!(Money::from_decimal(12.4, Currency::USD).amount, 12);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(13, Currency::USD).display(), "$13");
        assert_eq!(Money::new(1299, Currency::USD).display(), "$1,299");
        assert_eq!(Money::new(1_234_567, Currency::EUR).display(), "\u{20ac}1,234,567");
        assert_eq!(Money::new(0, Currency::USD).display(), "$0");
        assert_eq!(Money::new(-1500, Currency::USD).display_amount(), "-1,500");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(10, Currency::USD);
        let b = Money::new(5, Currency::USD);
        assert_eq!((a + b).amount, 15);
        assert_eq!((a * 3).amount, 30);
        assert_eq!(Money::new(200, Currency::USD).multiply_decimal(0.03).amount, 6);
    }

    #[test]
    fn test_sum() {
        let values = [Money::new(1, Currency::USD), Money::new(2, Currency::USD)];
        assert_eq!(Money::sum(values.iter(), Currency::USD).amount, 3);
    }
}
