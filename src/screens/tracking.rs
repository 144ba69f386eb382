// src/screens/tracking.rs

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::forms::ScrapeForm;
use crate::models::TrackingRecord;
use crate::screens::{ScreenContext, ScreenState};

pub const NOT_FOUND_MESSAGE: &str = "No tracking information found for this order ID. \
     The order may not exist or tracking has not been added yet.";
pub const LOOKUP_FAILED_MESSAGE: &str =
    "Failed to load tracking information. Please try again later.";

#[derive(Debug)]
pub struct TrackingScreen {
    state: ScreenState,
    record: RwLock<Option<TrackingRecord>>,
}

impl TrackingScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            state: ScreenState::new("tracking", ctx),
            record: RwLock::new(None),
        }
    }

    pub async fn record(&self) -> Option<TrackingRecord> {
        self.record.read().await.clone()
    }

    pub async fn lookup(&self, order_id: &str) -> Result<TrackingRecord> {
        let _busy = self.state.begin()?;
        self.fetch(order_id).await
    }

    async fn fetch(&self, order_id: &str) -> Result<TrackingRecord> {
        if order_id.trim().is_empty() {
            return Err(Error::validation("orderId", "Order ID is required"));
        }

        *self.record.write().await = None;
        match self.state.client().tracking().lookup(order_id).await {
            Ok(record) => {
                *self.record.write().await = Some(record.clone());
                Ok(record)
            }
            Err(e) if e.is_not_found() => Err(self.state.fail(e, NOT_FOUND_MESSAGE)),
            Err(e) => Err(self.state.fail(e, LOOKUP_FAILED_MESSAGE)),
        }
    }

    /// Asks the backend to refresh the order's tracking, then looks it up again
    pub async fn update(&self, order_id: &str) -> Result<TrackingRecord> {
        let _busy = self.state.begin()?;
        if order_id.trim().is_empty() {
            return Err(Error::validation("orderId", "Order ID is required"));
        }

        let result = self.state.client().tracking().refresh(order_id).await;
        self.state
            .report(result, "Tracking updated successfully", "Failed to update tracking")?;
        self.fetch(order_id).await
    }

    pub async fn scrape(&self, form: &ScrapeForm) -> Result<()> {
        let _busy = self.state.begin()?;
        form.check()?;

        let result = self
            .state
            .client()
            .tracking()
            .scrape(&form.tracking_number, &form.order_id)
            .await;
        self.state
            .report(result, "Scraping initiated successfully", "Failed to scrape tracking")
    }
}
