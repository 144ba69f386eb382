// src/models/settings.rs

use serde::{Deserialize, Serialize};

/// Global profit margin applied by the backend to scraped prices.
/// The endpoint returns the bare number, so this is transparent on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfitMargin {
    pub percentage: f64,
}

impl ProfitMargin {
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }
}

impl From<f64> for ProfitMargin {
    fn from(percentage: f64) -> Self {
        Self::new(percentage)
    }
}
