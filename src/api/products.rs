// src/api/products.rs

use crate::api::{decode, ApiClient};
use crate::error::Result;
use crate::models::{ImportRequest, Product, ProductImage};
use crate::platform::HttpMethod;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.client.get("/products/admin/all").await
    }

    pub async fn get(&self, id: EntityId) -> Result<Product> {
        self.client.get(&format!("/products/admin/{}", id)).await
    }

    pub async fn create(&self, product: &Product) -> Result<()> {
        self.client
            .send_json(HttpMethod::Post, "/products/admin/save", product)
            .await?;
        Ok(())
    }

    pub async fn update(&self, product: &Product) -> Result<()> {
        self.client
            .send_json(HttpMethod::Put, "/products/admin/update", product)
            .await?;
        Ok(())
    }

    /// The doubled `admin` segment is what the backend routes
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Delete, &format!("/products/admin/admin/delete/{}", id))
            .await?;
        Ok(())
    }

    pub async fn import(&self, url: &str, category_id: EntityId) -> Result<()> {
        let body = ImportRequest {
            url: url.trim().to_string(),
            category_id,
        };
        self.client
            .send_json(HttpMethod::Post, "/products/admin/import", &body)
            .await?;
        Ok(())
    }

    /// Starts the backend's bulk re-scrape job and returns immediately
    pub async fn trigger_scrape_update(&self) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Post, "/products/admin/scripting-update")
            .await?;
        Ok(())
    }

    pub async fn images(&self, id: EntityId) -> Result<Vec<ProductImage>> {
        let path = format!("/products-images/get-image/{}", id);
        let response = self.client.send_empty(HttpMethod::Post, &path).await?;
        decode(&path, &response)
    }

    pub async fn primary_image(&self, id: EntityId) -> Result<ProductImage> {
        let path = format!("/products-images/get-image/home/{}", id);
        let response = self.client.send_empty(HttpMethod::Post, &path).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProductImage::default());
        }
        decode(&path, &response)
    }
}
