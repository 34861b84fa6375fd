//! Cart pricing.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Σ(unit price × quantity).
    pub subtotal: Money,
    /// Σ quantity.
    pub item_count: u64,
    /// Number of lines.
    pub line_count: usize,
    /// Per-line breakdown.
    pub lines: Vec<LineTotal>,
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    /// Product on the line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price × quantity.
    pub total: Money,
}

impl CartTotals {
    /// Price a set of cart lines.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn compute(lines: &[CartLine], currency: Currency) -> Result<Self, CommerceError> {
        let lines: Vec<LineTotal> = lines
            .iter()
            .map(|line| -> Result<LineTotal, CommerceError> {
                let unit_price = Money::from_decimal(line.product.price, currency);
                let total = unit_price
                    .try_multiply(i64::from(line.quantity))
                    .ok_or(CommerceError::Overflow)?;
                Ok(LineTotal {
                    product_id: line.product.id.clone(),
                    unit_price,
                    quantity: line.quantity,
                    total,
                })
            })
            .collect::<Result<_, CommerceError>>()?;

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            item_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
            line_count: lines.len(),
            lines,
        })
    }

    /// Check if nothing is priced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRef;

    #[test]
    fn test_totals() {
        let lines = vec![
            CartLine::new(ProductRef::new("A", "Mug", 100.0), 3),
            CartLine::new(ProductRef::new("B", "Bowl", 50.0), 1),
        ];
        let totals = CartTotals::compute(&lines, Currency::INR).unwrap();

        assert_eq!(totals.subtotal.to_decimal(), 350.0);
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.lines[0].total.amount_cents, 30000);
    }

    #[test]
    fn test_fractional_prices_do_not_drift() {
        let lines = vec![CartLine::new(ProductRef::new("A", "Pin", 0.1), 3)];
        let totals = CartTotals::compute(&lines, Currency::INR).unwrap();
        assert_eq!(totals.subtotal.amount_cents, 30);
    }

    #[test]
    fn test_empty_cart() {
        let totals = CartTotals::compute(&[], Currency::INR).unwrap();
        assert!(totals.is_empty());
        assert!(totals.subtotal.is_zero());
    }

    #[test]
    fn test_overflow() {
        let lines = vec![CartLine::new(ProductRef::new("A", "Gold", 1e17), 9999)];
        assert!(matches!(
            CartTotals::compute(&lines, Currency::INR),
            Err(CommerceError::Overflow)
        ));
    }
}
