use contracts::domain::a001_product::ProductId;
use contracts::domain::a002_product_variant::{ProductVariant, ProductVariantDto, VariantId};
use contracts::domain::common::EntityId;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_variants(
    client: ApiClient,
    product_id: ProductId,
) -> Result<Vec<ProductVariant>, ApiError> {
    client
        .get(&format!(
            "/api/base-products/{}/variants",
            product_id.as_string()
        ))
        .await
}

pub async fn save_variant(
    client: ApiClient,
    dto: ProductVariantDto,
) -> Result<ProductVariant, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    match dto.id {
        Some(id) => {
            client
                .put(&format!("/api/product-variants/{}", id.as_string()), &dto)
                .await
        }
        None => client.post("/api/product-variants", &dto).await,
    }
}

pub async fn delete_variant(client: ApiClient, id: VariantId) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/product-variants/{}", id.as_string()))
        .await
}
