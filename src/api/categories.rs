// src/api/categories.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Category;
use crate::platform::HttpMethod;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct CategoriesApi {
    client: ApiClient,
}

impl CategoriesApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.client.get("/categories/get/all").await
    }

    pub async fn create(&self, category: &Category) -> Result<()> {
        self.client
            .send_json(HttpMethod::Post, "/categories/admin/save", category)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Delete, &format!("/categories/admin/delete/{}", id))
            .await?;
        Ok(())
    }
}
