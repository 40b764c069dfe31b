use async_trait::async_trait;
use contracts::domain::a001_product::{Product, ProductSearchQuery};

use super::scan_queue::ProductLookup;
use crate::domain::a001_product::api::search_products;
use crate::shared::api_utils::ApiError;
use crate::system::auth::context::AuthStore;

/// Barcode lookup through the catalog search endpoint
pub struct RemoteProductLookup {
    auth: AuthStore,
    per_page: u32,
}

impl RemoteProductLookup {
    pub fn new(auth: AuthStore, per_page: u32) -> Self {
        Self { auth, per_page }
    }
}

#[async_trait(?Send)]
impl ProductLookup for RemoteProductLookup {
    async fn search_by_code(&self, code: &str) -> Result<Vec<Product>, ApiError> {
        let query = ProductSearchQuery::barcode_lookup(code, self.per_page, self.auth.user_id());
        let response = self
            .auth
            .call(|client| search_products(client, query.clone()))
            .await?;
        Ok(response.products)
    }
}
