//! Sale cart: one line per variant, in the order variants were first added.
//!
//! Descriptive fields are copied from the catalog row when the line is
//! created and are not refreshed afterwards.

use contracts::domain::a001_product::{presentation, Product, ProductId};
use contracts::domain::a002_product_variant::VariantId;

/// Quantities keep at most three decimals (weighed goods).
pub const QUANTITY_DECIMALS: i32 = 3;

pub fn round_quantity(value: f64) -> f64 {
    let factor = 10f64.powi(QUANTITY_DECIMALS);
    (value * factor).round() / factor
}

/// Lenient decimal parse used for catalog prices and typed inputs.
///
/// Accepts a comma as decimal separator; anything unparsable, negative or
/// non-finite is `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Quantity left after taking one unit back; a line holding less than one
/// unit goes to zero so the decrement removes it.
pub fn quantity_after_decrement(current: f64) -> f64 {
    (current - 1.0).max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: i64,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub user_product_variant_id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub capacity: Option<String>,
    pub unit: Option<String>,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub stock_quantity: Option<f64>,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            product_id: product.product_id,
            variant_id: product.variant_id,
            user_product_variant_id: product.user_product_variant_id,
            name: product.name.clone(),
            price: parse_amount(&product.price).unwrap_or(0.0),
            quantity: 1.0,
            capacity: product.capacity.clone(),
            unit: product.unit.clone(),
            brand: product.brand.clone(),
            barcode: product.barcode.clone(),
            stock_quantity: product.stock_quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity
    }

    pub fn presentation(&self) -> String {
        presentation(self.capacity.as_deref(), self.unit.as_deref())
    }

    /// More units in the cart than the stock known at add time
    pub fn exceeds_stock(&self) -> bool {
        self.stock_quantity.is_some_and(|stock| self.quantity > stock)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, variant_id: VariantId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.variant_id == variant_id)
    }

    fn line_mut(&mut self, variant_id: VariantId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.variant_id == variant_id)
    }

    pub fn quantity_of(&self, variant_id: VariantId) -> f64 {
        self.line(variant_id).map(|l| l.quantity).unwrap_or(0.0)
    }

    /// Adds one unit, creating the line if the variant is not in the cart.
    pub fn add(&mut self, product: &Product) {
        match self.line_mut(product.variant_id) {
            Some(line) => line.quantity = round_quantity(line.quantity + 1.0),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Sets the quantity of a line.
    ///
    /// Negative values are ignored. Zero removes the line unless `allow_zero`
    /// is set, which keeps a zero line while the cashier is still typing
    /// (e.g. "0" on the way to "0.5"); the blur handler calls again with
    /// `allow_zero = false`.
    pub fn update_quantity(&mut self, variant_id: VariantId, quantity: f64, allow_zero: bool) {
        if !quantity.is_finite() || quantity < 0.0 {
            return;
        }
        let quantity = round_quantity(quantity);
        if quantity == 0.0 && !allow_zero {
            self.remove(variant_id);
            return;
        }
        if let Some(line) = self.line_mut(variant_id) {
            line.quantity = quantity;
        }
    }

    /// Negative or non-finite prices are ignored.
    pub fn update_price(&mut self, variant_id: VariantId, price: f64) {
        if !price.is_finite() || price < 0.0 {
            return;
        }
        if let Some(line) = self.line_mut(variant_id) {
            line.price = price;
        }
    }

    pub fn remove(&mut self, variant_id: VariantId) {
        self.lines.retain(|l| l.variant_id != variant_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::domain::common::EntityId;

    pub(crate) fn product(variant: i64, barcode: &str, price: &str) -> Product {
        Product {
            id: variant * 10,
            product_id: ProductId(variant * 100),
            variant_id: VariantId(variant),
            user_product_variant_id: Some(variant + 1000),
            name: format!("Producto {}", variant),
            price: price.to_string(),
            capacity: Some("500".into()),
            unit: Some("ml".into()),
            brand: Some("Acme".into()),
            barcode: Some(barcode.to_string()),
            stock_quantity: Some(10.0),
        }
    }

    #[test]
    fn test_add_twice_increments_single_line() {
        let mut cart = CartLedger::new();
        let p = product(9, "12345678", "10.00");
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(VariantId(9)), 2.0);
    }

    #[test]
    fn test_add_copies_descriptive_fields() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "12345678", "10.00"));
        let line = cart.line(VariantId::new(9)).unwrap();
        assert_eq!(line.price, 10.0);
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.product_id, ProductId(900));
        assert_eq!(line.user_product_variant_id, Some(1009));
        assert_eq!(line.brand.as_deref(), Some("Acme"));
        assert_eq!(line.barcode.as_deref(), Some("12345678"));
        assert_eq!(line.stock_quantity, Some(10.0));
        assert_eq!(line.presentation(), "500 ml");
    }

    #[test]
    fn test_unparsable_price_defaults_to_zero() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "gratis"));
        cart.add(&product(2, "", ""));
        cart.add(&product(3, "", "2,5"));
        assert_eq!(cart.line(VariantId(1)).unwrap().price, 0.0);
        assert_eq!(cart.line(VariantId(2)).unwrap().price, 0.0);
        assert_eq!(cart.line(VariantId(3)).unwrap().price, 2.5);
    }

    #[test]
    fn test_add_ignores_zero_being_typed() {
        let mut cart = CartLedger::new();
        let p = product(9, "", "1");
        cart.add(&p);
        cart.update_quantity(VariantId(9), 0.0, true);
        cart.add(&p);
        assert_eq!(cart.quantity_of(VariantId(9)), 1.0);
    }

    #[test]
    fn test_zero_quantity_boundary() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "", "1"));

        cart.update_quantity(VariantId(9), 0.0, true);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(VariantId(9)), 0.0);

        cart.update_quantity(VariantId(9), 0.0, false);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_edits_are_ignored() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "", "4"));
        cart.update_quantity(VariantId(9), -1.0, false);
        cart.update_price(VariantId(9), -0.01);
        cart.update_quantity(VariantId(9), f64::NAN, false);
        let line = cart.line(VariantId(9)).unwrap();
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.price, 4.0);
    }

    #[test]
    fn test_fractional_quantity_keeps_three_decimals() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "", "4"));
        cart.update_quantity(VariantId(9), 0.12345, false);
        assert_eq!(cart.quantity_of(VariantId(9)), 0.123);

        // rounds down to zero: same as typing zero
        cart.update_quantity(VariantId(9), 0.0004, false);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_removes_fractional_line() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "", "4"));
        cart.update_quantity(VariantId(9), 0.5, false);

        let next = quantity_after_decrement(cart.quantity_of(VariantId(9)));
        cart.update_quantity(VariantId(9), next, false);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_keeps_remaining_units() {
        let mut cart = CartLedger::new();
        cart.add(&product(9, "", "4"));
        cart.update_quantity(VariantId(9), 2.5, false);

        let next = quantity_after_decrement(cart.quantity_of(VariantId(9)));
        cart.update_quantity(VariantId(9), next, false);
        assert_eq!(cart.quantity_of(VariantId(9)), 1.5);

        cart.update_quantity(VariantId(9), 1.0, false);
        let next = quantity_after_decrement(cart.quantity_of(VariantId(9)));
        cart.update_quantity(VariantId(9), next, false);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_updates_to_unknown_variant_are_noops() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "1"));
        let before = cart.clone();
        cart.update_quantity(VariantId(2), 3.0, false);
        cart.update_price(VariantId(2), 3.0);
        cart.remove(VariantId(2));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "1"));
        cart.add(&product(2, "", "1"));
        cart.add(&product(3, "", "1"));
        cart.update_price(VariantId(1), 9.0);
        cart.update_quantity(VariantId(2), 5.0, false);
        let order: Vec<i64> = cart.lines().iter().map(|l| l.variant_id.0).collect();
        assert_eq!(order, vec![1, 2, 3]);

        cart.remove(VariantId(1));
        cart.add(&product(1, "", "1"));
        let order: Vec<i64> = cart.lines().iter().map(|l| l.variant_id.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_exceeds_stock() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "", "1"));
        cart.update_quantity(VariantId(1), 11.0, false);
        assert!(cart.line(VariantId(1)).unwrap().exceeds_stock());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 10.50 "), Some(10.5));
        assert_eq!(parse_amount("3,2"), Some(3.2));
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
