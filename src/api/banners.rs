// src/api/banners.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Banner;
use crate::platform::HttpMethod;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct BannersApi {
    client: ApiClient,
}

impl BannersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Banner>> {
        self.client.get("/home-banners/get").await
    }

    pub async fn create(&self, banner: &Banner) -> Result<()> {
        self.client
            .send_json(HttpMethod::Post, "/home-banners/admin/create", banner)
            .await?;
        Ok(())
    }

    pub async fn update(&self, banner: &Banner) -> Result<()> {
        self.client
            .send_json(HttpMethod::Put, "/home-banners/admin/update", banner)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Delete, &format!("/home-banners/admin/delete/{}", id))
            .await?;
        Ok(())
    }
}
