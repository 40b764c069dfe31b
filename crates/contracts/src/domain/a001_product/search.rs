use crate::domain::a001_product::ProductId;
use crate::domain::a002_product_variant::VariantId;
use crate::domain::common::lenient;
use serde::{Deserialize, Serialize};

/// Sellable catalog row returned by the product search endpoint.
///
/// One row per variant; the sale screen and the barcode resolver consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_id: ProductId,
    pub variant_id: VariantId,

    #[serde(default)]
    pub user_product_variant_id: Option<i64>,

    pub name: String,

    /// Decimal price as sent by the backend, parsed by consumers.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub price: String,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub capacity: Option<String>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub barcode: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub stock_quantity: Option<f64>,
}

impl Product {
    /// Exact match against the trimmed barcode.
    pub fn has_barcode(&self, code: &str) -> bool {
        self.barcode
            .as_deref()
            .map(str::trim)
            .is_some_and(|b| !b.is_empty() && b == code)
    }

    /// "Cola 500 ml" style label used on tiles and cart rows.
    pub fn presentation(&self) -> String {
        presentation(self.capacity.as_deref(), self.unit.as_deref())
    }
}

/// Capacity and unit as one label ("500 ml"); empty without a capacity.
pub fn presentation(capacity: Option<&str>, unit: Option<&str>) -> String {
    match (capacity, unit) {
        (Some(c), Some(u)) => format!("{} {}", c, u),
        (Some(c), None) => c.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query string of `GET /api/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchQuery {
    pub page: u32,
    pub per_page: u32,

    #[serde(rename = "searchTerm")]
    pub search_term: String,

    pub sort: String,
    pub order: SortOrder,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Default for ProductSearchQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 24,
            search_term: String::new(),
            sort: "name".to_string(),
            order: SortOrder::Asc,
            user_id: None,
        }
    }
}

impl ProductSearchQuery {
    /// First page of a server-side search by scanned code.
    pub fn barcode_lookup(code: &str, per_page: u32, user_id: Option<String>) -> Self {
        Self {
            page: 1,
            per_page,
            search_term: code.to_string(),
            user_id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductSearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub total: u64,
}

impl ProductSearchResponse {
    pub fn total_pages(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total.div_ceil(per_page as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::EntityId;

    #[test]
    fn test_product_parses_backend_row() {
        let json = r#"{
            "id": 1,
            "product_id": 4,
            "variant_id": 9,
            "user_product_variant_id": 15,
            "name": "Cola",
            "price": "10.00",
            "capacity": 500,
            "unit": "ml",
            "brand": "Acme",
            "barcode": " 12345678 ",
            "stock_quantity": "7"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.variant_id.value(), 9);
        assert_eq!(p.price, "10.00");
        assert_eq!(p.capacity.as_deref(), Some("500"));
        assert_eq!(p.stock_quantity, Some(7.0));
        assert!(p.has_barcode("12345678"));
        assert!(!p.has_barcode("1234567"));
        assert_eq!(p.presentation(), "500 ml");
    }

    #[test]
    fn test_presentation_label() {
        assert_eq!(presentation(Some("1"), Some("kg")), "1 kg");
        assert_eq!(presentation(Some("6"), None), "6");
        assert_eq!(presentation(None, Some("ml")), "");
    }

    #[test]
    fn test_missing_barcode_never_matches() {
        let json = r#"{"id": 1, "product_id": 1, "variant_id": 1, "name": "x", "barcode": null}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert!(!p.has_barcode(""));
        assert_eq!(p.price, "");
    }

    #[test]
    fn test_barcode_lookup_query() {
        let q = ProductSearchQuery::barcode_lookup("12345678", 5, None);
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 5);
        assert_eq!(q.search_term, "12345678");

        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["searchTerm"], "12345678");
        assert_eq!(json["order"], "asc");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_total_pages() {
        let r = ProductSearchResponse {
            products: vec![],
            total: 49,
        };
        assert_eq!(r.total_pages(24), 3);
        assert_eq!(r.total_pages(0), 0);
    }
}
