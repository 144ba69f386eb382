// src/api/blog.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::BlogPost;
use crate::platform::HttpMethod;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct BlogApi {
    client: ApiClient,
}

impl BlogApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<BlogPost>> {
        self.client.get("/blog/get/all").await
    }

    pub async fn get(&self, id: EntityId) -> Result<BlogPost> {
        self.client.get(&format!("/blog/get/{}", id)).await
    }

    pub async fn create(&self, post: &BlogPost) -> Result<()> {
        self.client
            .send_json(HttpMethod::Post, "/blog/admin/create", post)
            .await?;
        Ok(())
    }

    pub async fn update(&self, post: &BlogPost) -> Result<()> {
        self.client
            .send_json(HttpMethod::Put, "/blog/admin/update", post)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Delete, &format!("/blog/admin/delete/{}", id))
            .await?;
        Ok(())
    }
}
