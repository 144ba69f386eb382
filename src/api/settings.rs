// src/api/settings.rs

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::ProfitMargin;
use crate::platform::HttpMethod;

#[derive(Debug, Clone)]
pub struct SettingsApi {
    client: ApiClient,
}

impl SettingsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profit_margin(&self) -> Result<ProfitMargin> {
        self.client.get("/config/profit-margin").await
    }

    /// The percentage travels as a query parameter, not a body
    pub async fn set_profit_margin(&self, margin: ProfitMargin) -> Result<()> {
        let value = margin.percentage.to_string();
        let path = format!(
            "/config/profit-margin?percentage={}",
            urlencoding::encode(&value)
        );
        self.client.send_empty(HttpMethod::Put, &path).await?;
        Ok(())
    }
}
