// src/api/best_products.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Product;
use crate::platform::HttpMethod;
use crate::types::EntityId;

/// Curated "best products" shelf of the storefront home page
#[derive(Debug, Clone)]
pub struct BestProductsApi {
    client: ApiClient,
}

impl BestProductsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.client.get("/best/get-products").await
    }

    pub async fn add(&self, product_id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Post, &format!("/best/admin/set-products/{}", product_id))
            .await?;
        Ok(())
    }

    pub async fn remove(&self, product_id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Post, &format!("/best/admin/delete/{}", product_id))
            .await?;
        Ok(())
    }
}
