// src/api/tracking.rs

use crate::api::{segment, ApiClient};
use crate::error::Result;
use crate::models::{ScrapeRequest, TrackingRecord};
use crate::platform::HttpMethod;

#[derive(Debug, Clone)]
pub struct TrackingApi {
    client: ApiClient,
}

impl TrackingApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn lookup(&self, order_id: &str) -> Result<TrackingRecord> {
        self.client
            .get(&format!("/track/track-order/{}", segment(order_id)))
            .await
    }

    /// Asks the backend to refresh the tracking data of one order.
    /// `track-udpate` is the backend's spelling.
    pub async fn refresh(&self, order_id: &str) -> Result<()> {
        self.client
            .send_empty(HttpMethod::Post, &format!("/track/track-udpate/{}", segment(order_id)))
            .await?;
        Ok(())
    }

    pub async fn scrape(&self, tracking_number: &str, order_id: &str) -> Result<()> {
        let body = ScrapeRequest {
            tracking_number: tracking_number.trim().to_string(),
            order_id: order_id.trim().to_string(),
        };
        self.client
            .send_json(HttpMethod::Post, "/track/admin/scrape", &body)
            .await?;
        Ok(())
    }
}
