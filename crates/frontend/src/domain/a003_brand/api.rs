use contracts::domain::a003_brand::{Brand, BrandDto, BrandId};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_brands(client: ApiClient) -> Result<Vec<Brand>, ApiError> {
    client.get("/api/brands").await
}

pub async fn save_brand(client: ApiClient, dto: BrandDto) -> Result<Brand, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    match dto.id {
        Some(id) => {
            client
                .put(&format!("/api/brands/{}", id.as_string()), &dto)
                .await
        }
        None => client.post("/api/brands", &dto).await,
    }
}

pub async fn delete_brand(client: ApiClient, id: BrandId) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/brands/{}", id.as_string()))
        .await
}
