use contracts::domain::a001_product::{
    BaseProduct, BaseProductDto, ProductId, ProductSearchQuery, ProductSearchResponse,
};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{ApiClient, ApiError};

/// Sellable rows (one per variant) for the catalog grid and barcode lookup
pub async fn search_products(
    client: ApiClient,
    query: ProductSearchQuery,
) -> Result<ProductSearchResponse, ApiError> {
    client.get_with_query("/api/products", &query).await
}

pub async fn fetch_base_products(client: ApiClient) -> Result<Vec<BaseProduct>, ApiError> {
    client.get("/api/base-products").await
}

pub async fn fetch_base_product(client: ApiClient, id: ProductId) -> Result<BaseProduct, ApiError> {
    client
        .get(&format!("/api/base-products/{}", id.as_string()))
        .await
}

/// Creates or updates depending on `dto.id`; returns the stored product
pub async fn save_base_product(
    client: ApiClient,
    dto: BaseProductDto,
) -> Result<BaseProduct, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    match dto.id {
        Some(id) => {
            client
                .put(&format!("/api/base-products/{}", id.as_string()), &dto)
                .await
        }
        None => client.post("/api/base-products", &dto).await,
    }
}

pub async fn delete_base_product(client: ApiClient, id: ProductId) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/base-products/{}", id.as_string()))
        .await
}
