// src/api/orders.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Order, OrderStatus, StatusUpdate};
use crate::platform::HttpMethod;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        self.client
            .get(&format!("/orders/admin/status/{}", status.as_str()))
            .await
    }

    pub async fn get(&self, id: EntityId) -> Result<Order> {
        self.client.get(&format!("/orders/admin/{}", id)).await
    }

    pub async fn update_status(&self, id: EntityId, update: &StatusUpdate) -> Result<()> {
        self.client
            .send_json(HttpMethod::Patch, &format!("/orders/admin/{}/status", id), update)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Delete, &format!("/orders/admin/{}", id))
            .await?;
        Ok(())
    }
}
