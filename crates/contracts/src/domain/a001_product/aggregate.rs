use crate::domain::a003_brand::BrandId;
use crate::domain::a004_category::CategoryId;
use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl EntityId for ProductId {
    fn new(value: i64) -> Self {
        Self(value)
    }

    fn value(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// Base product
// ============================================================================

/// Base product: the brand/category-level entity that owns sellable variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseProduct {
    pub id: ProductId,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub brand_id: Option<BrandId>,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Denormalized names, filled by the list endpoint only.
    #[serde(default)]
    pub brand_name: Option<String>,

    #[serde(default)]
    pub category_name: Option<String>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a base product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BaseProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
}

impl BaseProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio".into());
        }
        Ok(())
    }
}

impl From<&BaseProduct> for BaseProductDto {
    fn from(p: &BaseProduct) -> Self {
        Self {
            id: Some(p.id),
            name: p.name.clone(),
            description: p.description.clone(),
            brand_id: p.brand_id,
            category_id: p.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_requires_name() {
        let dto = BaseProductDto {
            name: "   ".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = BaseProductDto {
            name: "Cola".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_new_dto_omits_id() {
        let dto = BaseProductDto {
            name: "Cola".into(),
            brand_id: Some(BrandId(3)),
            ..Default::default()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["brand_id"], 3);
    }
}
