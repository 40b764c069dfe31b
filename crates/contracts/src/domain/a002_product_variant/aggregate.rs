use crate::domain::a001_product::ProductId;
use crate::domain::common::{lenient, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub i64);

impl EntityId for VariantId {
    fn new(value: i64) -> Self {
        Self(value)
    }

    fn value(&self) -> i64 {
        self.0
    }
}

/// Sellable presentation of a base product ("Cola 500ml can")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub capacity: Option<String>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub barcode: Option<String>,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub price: String,

    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub stock_quantity: Option<f64>,
}

/// DTO for creating/updating a variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductVariantDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    pub product_id: Option<ProductId>,
    pub capacity: Option<String>,
    pub unit: Option<String>,
    pub barcode: Option<String>,
    pub price: f64,
    pub stock_quantity: Option<f64>,
}

impl ProductVariantDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.is_none() {
            return Err("La variante debe pertenecer a un producto".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("El precio debe ser un número mayor o igual a 0".into());
        }
        if let Some(stock) = self.stock_quantity {
            if !stock.is_finite() || stock < 0.0 {
                return Err("El stock no puede ser negativo".into());
            }
        }
        Ok(())
    }
}

impl From<&ProductVariant> for ProductVariantDto {
    fn from(v: &ProductVariant) -> Self {
        Self {
            id: Some(v.id),
            product_id: Some(v.product_id),
            capacity: v.capacity.clone(),
            unit: v.unit.clone(),
            barcode: v.barcode.clone(),
            price: v.price.trim().parse().unwrap_or(0.0),
            stock_quantity: v.stock_quantity,
        }
    }
}
