//! Money calculation utilities using rust_decimal
//!
//! Amounts are stored as `f64`; sums, differences and ratios are computed in
//! `Decimal` and rounded back to 2 decimal places (half away from zero).

use rust_decimal::prelude::*;
use shared::models::CartLine;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to cents
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum of caller-supplied line subtotals. Subtotals are trusted as given.
pub fn sum_subtotals(lines: &[CartLine]) -> f64 {
    to_f64(lines.iter().map(|l| to_decimal(l.subtotal)).sum())
}

pub fn profit(revenue: f64, cost: f64) -> f64 {
    to_f64(to_decimal(revenue) - to_decimal(cost))
}

/// Profit over revenue as a percentage with one decimal; 0 when revenue is 0
pub fn margin_percent(profit: f64, revenue: f64) -> f64 {
    let revenue = to_decimal(revenue);
    if revenue.is_zero() {
        return 0.0;
    }
    (to_decimal(profit) / revenue * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, unit_price: f64) -> CartLine {
        CartLine {
            menu_item_id: 1,
            quantity,
            unit_price,
            subtotal: quantity as f64 * unit_price,
            notes: None,
        }
    }

    #[test]
    fn test_sum_subtotals_avoids_float_drift() {
        let lines = vec![line(1, 0.1), line(1, 0.2)];
        assert_eq!(sum_subtotals(&lines), 0.3);

        let lines = vec![line(2, 10.0), line(1, 5.0)];
        assert_eq!(sum_subtotals(&lines), 25.0);
        assert_eq!(sum_subtotals(&[]), 0.0);
    }

    #[test]
    fn test_margin_zero_revenue() {
        assert_eq!(margin_percent(0.0, 0.0), 0.0);
        assert_eq!(margin_percent(-5.0, 0.0), 0.0);
    }

    #[test]
    fn test_margin_rounding() {
        assert_eq!(margin_percent(profit(30.0, 10.0), 30.0), 66.7);
        assert_eq!(margin_percent(profit(25.0, 10.0), 25.0), 60.0);
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(0.125), 0.13);
        assert_eq!(round_money(-0.125), -0.13);
        assert_eq!(round_money(f64::NAN), 0.0);
    }
}
