//! Figures derived from the cart: item count, raw total and the amount due.

use super::cart_ledger::{round_quantity, CartLedger};

/// Rounds up to the next tenth.
///
/// The value is first snapped to three decimals (with an epsilon nudge) so
/// that binary drift such as `0.8 * 3 == 2.4000000000000004` does not bump
/// the result; any real remainder below the tenth then rounds up.
///
/// `2.401 -> 2.5`, `2.41 -> 2.5`, `2.40 -> 2.4`, `2.0 -> 2.0`
pub fn round_up_to_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let thousandths = ((value + f64::EPSILON) * 1000.0).round();
    (thousandths / 100.0).ceil() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub total_items: f64,
    pub raw_total: f64,
    /// Rounded total shown to the cashier and charged
    pub amount_due: f64,
}

impl CartTotals {
    pub fn of(cart: &CartLedger) -> Self {
        let (total_items, raw_total) = cart
            .lines()
            .iter()
            .fold((0.0, 0.0), |(items, total), line| {
                (items + line.quantity, total + line.subtotal())
            });
        Self {
            total_items: round_quantity(total_items),
            raw_total,
            amount_due: round_up_to_one_decimal(raw_total),
        }
    }
}

/// Change owed for cash `tendered`; `None` while it does not cover `amount_due`.
pub fn change_due(amount_due: f64, tendered: f64) -> Option<f64> {
    if !tendered.is_finite() || tendered + f64::EPSILON < amount_due {
        return None;
    }
    Some(((tendered - amount_due) * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_touch_sale::cart_ledger::tests::product;
    use contracts::domain::a002_product_variant::VariantId;

    #[test]
    fn test_rounding_law() {
        assert_eq!(round_up_to_one_decimal(2.401), 2.5);
        assert_eq!(round_up_to_one_decimal(2.41), 2.5);
        assert_eq!(round_up_to_one_decimal(2.40), 2.4);
        assert_eq!(round_up_to_one_decimal(2.0), 2.0);
        assert_eq!(round_up_to_one_decimal(0.0), 0.0);
    }

    #[test]
    fn test_float_drift_does_not_round_up() {
        let drifted = 0.8 * 3.0;
        assert_ne!(drifted, 2.4);
        assert_eq!(round_up_to_one_decimal(drifted), 2.4);
        assert_eq!(round_up_to_one_decimal(0.1 + 0.2), 0.3);
        assert_eq!(round_up_to_one_decimal(1.1 * 3.0), 3.3);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(round_up_to_one_decimal(f64::NAN), 0.0);
        assert_eq!(round_up_to_one_decimal(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_totals_of_cart() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "0.80"));
        cart.update_quantity(VariantId(1), 3.0, false);
        cart.add(&product(2, "", "1.25"));
        cart.update_quantity(VariantId(2), 0.5, false);

        let totals = CartTotals::of(&cart);
        assert_eq!(totals.total_items, 3.5);
        assert!((totals.raw_total - 3.025).abs() < 1e-9);
        assert_eq!(totals.amount_due, 3.1);
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(CartTotals::of(&CartLedger::new()), CartTotals::default());
    }

    #[test]
    fn test_totals_do_not_mutate_cart() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "1"));
        let before = cart.clone();
        let _ = CartTotals::of(&cart);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_change_due() {
        assert_eq!(change_due(10.0, 20.0), Some(10.0));
        assert_eq!(change_due(2.4, 2.4), Some(0.0));
        assert_eq!(change_due(3.1, 5.0), Some(1.9));
        assert_eq!(change_due(10.0, 9.99), None);
        assert_eq!(change_due(10.0, f64::NAN), None);
    }
}
