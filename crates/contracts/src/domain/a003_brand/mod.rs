use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(pub i64);

impl EntityId for BrandId {
    fn new(value: i64) -> Self {
        Self(value)
    }

    fn value(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrandDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BrandId>,
    pub name: String,
}

impl BrandDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre de la marca es obligatorio".into());
        }
        Ok(())
    }
}
