// src/models/tracking.rs

use serde::{Deserialize, Serialize};

use super::serde_helpers::string_or_number;

/// Shipment tracking snapshot for one order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_description: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub days_on_route: Option<String>,
    #[serde(default)]
    pub couriers: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: Option<String>,
    /// Free text history as produced by the scraper
    #[serde(default)]
    pub timeline: Option<String>,
}

/// Body of `POST /track/admin/scrape`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub tracking_number: String,
    pub order_id: String,
}
