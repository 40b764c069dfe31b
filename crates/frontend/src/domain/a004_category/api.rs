use contracts::domain::a004_category::{Category, CategoryDto, CategoryId, CategoryListPayload};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{ApiClient, ApiError};

/// Category listing, normalized to a plain list whatever shape the backend
/// answered with
pub async fn fetch_categories(client: ApiClient) -> Result<Vec<Category>, ApiError> {
    let payload: CategoryListPayload = client.get("/api/categories").await?;
    Ok(payload.into_categories())
}

pub async fn save_category(client: ApiClient, dto: CategoryDto) -> Result<Category, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    match dto.id {
        Some(id) => {
            client
                .put(&format!("/api/categories/{}", id.as_string()), &dto)
                .await
        }
        None => client.post("/api/categories", &dto).await,
    }
}

pub async fn delete_category(client: ApiClient, id: CategoryId) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/categories/{}", id.as_string()))
        .await
}
