use contracts::domain::a001_product::ProductId;
use contracts::domain::a002_product_variant::{ProductVariant, ProductVariantDto, VariantId};

use crate::usecases::u501_touch_sale::cart_ledger::parse_amount;
use crate::usecases::u501_touch_sale::scan_queue::is_barcode;

/// Raw text of the variant fields as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantForm {
    pub price: String,
    pub barcode: String,
    pub capacity: String,
    pub unit: String,
    pub stock: String,
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl VariantForm {
    pub fn from_variant(v: &ProductVariant) -> Self {
        Self {
            price: v.price.clone(),
            barcode: v.barcode.clone().unwrap_or_default(),
            capacity: v.capacity.clone().unwrap_or_default(),
            unit: v.unit.clone().unwrap_or_default(),
            stock: v.stock_quantity.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    /// Parses the typed text. Price is required; a barcode, when present,
    /// must be all digits and at least `min_barcode_length` long.
    pub fn to_dto(
        &self,
        id: Option<VariantId>,
        product_id: Option<ProductId>,
        min_barcode_length: usize,
    ) -> Result<ProductVariantDto, String> {
        let price =
            parse_amount(&self.price).ok_or("El precio es obligatorio y debe ser un número")?;

        let barcode = non_empty(&self.barcode);
        if let Some(code) = &barcode {
            if !is_barcode(code, min_barcode_length) {
                return Err(format!(
                    "El código de barras debe tener al menos {} dígitos",
                    min_barcode_length
                ));
            }
        }

        let stock_quantity = match non_empty(&self.stock) {
            Some(text) => Some(parse_amount(&text).ok_or("El stock debe ser un número")?),
            None => None,
        };

        Ok(ProductVariantDto {
            id,
            product_id,
            capacity: non_empty(&self.capacity),
            unit: non_empty(&self.unit),
            barcode,
            price,
            stock_quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_variant_round_trips_through_dto() {
        let variant = ProductVariant {
            id: VariantId(4),
            product_id: ProductId(2),
            capacity: Some("1".into()),
            unit: Some("kg".into()),
            barcode: Some("7790001112223".into()),
            price: "99.9".into(),
            stock_quantity: Some(3.5),
        };
        let form = VariantForm::from_variant(&variant);
        assert_eq!(form.stock, "3.5");

        let dto = form.to_dto(Some(variant.id), Some(variant.product_id), 8).unwrap();
        assert_eq!(dto, ProductVariantDto::from(&variant));
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let form = VariantForm {
            price: "0".into(),
            capacity: "  ".into(),
            ..Default::default()
        };
        let dto = form.to_dto(None, None, 8).unwrap();
        assert_eq!(dto.price, 0.0);
        assert_eq!(dto.capacity, None);
        assert_eq!(dto.barcode, None);
        assert_eq!(dto.stock_quantity, None);
    }
}
