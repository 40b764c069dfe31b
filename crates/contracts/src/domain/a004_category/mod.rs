use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl EntityId for CategoryId {
    fn new(value: i64) -> Self {
        Self(value)
    }

    fn value(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
}

impl CategoryDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre de la categoría es obligatorio".into());
        }
        Ok(())
    }
}

/// Every shape the category listing endpoint has been seen to return.
///
/// Normalize with [`CategoryListPayload::into_categories`] right after
/// decoding; nothing past the API client sees this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryListPayload {
    Bare(Vec<Category>),
    Data { data: Vec<Category> },
    Categories { categories: Vec<Category> },
}

impl CategoryListPayload {
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Bare(items) | Self::Data { data: items } | Self::Categories { categories: items } => {
                items
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(json: &str) -> Vec<String> {
        serde_json::from_str::<CategoryListPayload>(json)
            .unwrap()
            .into_categories()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_all_payload_shapes_normalize() {
        let expected = vec!["Bebidas".to_string(), "Lácteos".to_string()];
        assert_eq!(
            names(r#"[{"id": 1, "name": "Bebidas"}, {"id": 2, "name": "Lácteos"}]"#),
            expected
        );
        assert_eq!(
            names(r#"{"data": [{"id": 1, "name": "Bebidas"}, {"id": 2, "name": "Lácteos"}]}"#),
            expected
        );
        assert_eq!(
            names(r#"{"categories": [{"id": 1, "name": "Bebidas"}, {"id": 2, "name": "Lácteos"}]}"#),
            expected
        );
    }

    #[test]
    fn test_empty_payloads() {
        assert!(names("[]").is_empty());
        assert!(names(r#"{"data": []}"#).is_empty());
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        assert!(serde_json::from_str::<CategoryListPayload>(r#"{"items": []}"#).is_err());
    }
}
