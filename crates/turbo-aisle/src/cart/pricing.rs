//! Cart fee and summary.

use serde::Serialize;

use crate::cart::CartLine;
use crate::money::{Currency, Money};

/// Percentage part of the service fee.
pub const FEE_RATE: f64 = 0.03;

/// Flat part of the service fee, in the smallest currency unit.
pub const FEE_FLAT: i64 = 7;

/// Service fee for a subtotal: nothing on an empty cart, otherwise 3%
/// rounded to the nearest unit, plus 7.
///
/// ```
/// use turbo_aisle::cart::fee;
/// assert_eq!(fee(200), 13);
/// assert_eq!(fee(0), 0);
/// ```
pub fn fee(subtotal: i64) -> i64 {
    service_fee(Money::new(subtotal, Currency::default())).amount
}

/// [`fee`] in the subtotal's currency.
pub fn service_fee(subtotal: Money) -> Money {
    if !subtotal.is_positive() {
        return Money::zero(subtotal.currency);
    }
    subtotal.multiply_decimal(FEE_RATE) + Money::new(FEE_FLAT, subtotal.currency)
}

/// Cart state as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities, for the header badge.
    pub count: i64,
    pub subtotal: Money,
    pub fee: Money,
    /// Subtotal plus fee.
    pub total: Money,
    /// Lines in the order they were first added.
    pub lines: Vec<CartLine>,
    pub is_empty: bool,
}

impl CartSummary {
    /// Summarize a set of lines.
    pub fn from_lines(lines: Vec<CartLine>, currency: Currency) -> Self {
        let count = lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity));
        let line_totals: Vec<Money> = lines
            .iter()
            .map(|l| Money::new(l.unit_price, currency) * l.quantity)
            .collect();
        let subtotal = Money::sum(line_totals.iter(), currency);
        let fee = service_fee(subtotal);
        Self {
            count,
            subtotal,
            fee,
            total: subtotal + fee,
            is_empty: lines.is_empty(),
            lines,
        }
    }

    pub fn display_subtotal(&self) -> String {
        self.subtotal.display()
    }

    pub fn display_fee(&self) -> String {
        self.fee.display()
    }

    pub fn display_total(&self) -> String {
        self.total.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;

    #[test]
    fn test_fee() {
        assert_eq!(fee(200), 13);
        assert_eq!(fee(0), 0);
        assert_eq!(fee(-50), 0);
        // 3% of 1 rounds to 0; the flat part still applies.
        assert_eq!(fee(1), 7);
        // 3% of 50 is 1.5, rounded before adding.
        assert_eq!(fee(50), 9);
        assert_eq!(fee(1000), 37);
    }

    #[test]
    fn test_summary() {
        let lines = vec![
            CartLine::new(ItemId::new("a"), "Crisps", 13, 2),
            CartLine::new(ItemId::new("b"), "Soda", 174, 1),
        ];
        let summary = CartSummary::from_lines(lines, Currency::USD);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.subtotal.amount, 200);
        assert_eq!(summary.fee.amount, 13);
        assert_eq!(summary.total.amount, 213);
        assert!(!summary.is_empty);
        assert_eq!(summary.display_subtotal(), "$200");
        assert_eq!(summary.display_fee(), "$13");
        assert_eq!(summary.display_total(), "$213");
    }

    #[test]
    fn test_service_fee_keeps_currency() {
        let fee = service_fee(Money::new(200, Currency::JPY));
        assert_eq!(fee, Money::new(13, Currency::JPY));
        assert_eq!(service_fee(Money::zero(Currency::EUR)), Money::zero(Currency::EUR));
    }

    #[test]
    fn test_summary_saturates_huge_quantities() {
        let lines = vec![
            CartLine::new(ItemId::new("a"), "Crisps", 2, i64::MAX),
            CartLine::new(ItemId::new("b"), "Soda", 3, 5),
        ];
        let summary = CartSummary::from_lines(lines, Currency::USD);

        assert_eq!(summary.count, i64::MAX);
        assert_eq!(summary.subtotal.amount, i64::MAX);
        assert_eq!(summary.total.amount, i64::MAX);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_lines(vec![], Currency::GBP);
        assert!(summary.is_empty);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.display_fee(), "\u{00a3}0");
    }
}
