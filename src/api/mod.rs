// src/api/mod.rs

//! Typed client for the storefront REST contract
//!
//! [`ApiClient`] owns the immutable [`ClientConfig`] and a transport. Each
//! resource gets a thin wrapper (`client.products()`, `client.orders()` ...)
//! that knows its paths and payload shapes.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::platform::{HttpMethod, NetworkArc, NetworkRequest, NetworkResponse};

pub mod banners;
pub mod best_products;
pub mod blog;
pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tracking;
pub mod upload;

pub use banners::BannersApi;
pub use best_products::BestProductsApi;
pub use blog::BlogApi;
pub use categories::CategoriesApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;
pub use settings::SettingsApi;
pub use tracking::TrackingApi;
pub use upload::UploadApi;

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    network: NetworkArc,
    logger: Logger,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .field("image_server_url", &self.config.image_server_url())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: Arc<ClientConfig>, network: NetworkArc) -> Self {
        Self {
            config,
            network,
            logger: Logger::new("api_client"),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    pub fn banners(&self) -> BannersApi {
        BannersApi::new(self.clone())
    }

    pub fn blog(&self) -> BlogApi {
        BlogApi::new(self.clone())
    }

    pub fn tracking(&self) -> TrackingApi {
        TrackingApi::new(self.clone())
    }

    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(self.clone())
    }

    pub fn best_products(&self) -> BestProductsApi {
        BestProductsApi::new(self.clone())
    }

    pub fn uploads(&self) -> UploadApi {
        UploadApi::new(self.clone())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.request(HttpMethod::Get, path)).await?;
        decode(path, &response)
    }

    pub(crate) async fn send_json<B>(&self, method: HttpMethod, path: &str, body: &B) -> Result<NetworkResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path).json(body)?;
        self.execute(request).await
    }

    /// Request without a body; the response body is returned undecoded
    pub(crate) async fn send_empty(&self, method: HttpMethod, path: &str) -> Result<NetworkResponse> {
        self.execute(self.request(method, path)).await
    }

    fn request(&self, method: HttpMethod, path: &str) -> NetworkRequest {
        NetworkRequest::new(method, self.config.endpoint(path))
            .header("Accept", "application/json")
            .timeout(self.config.request_timeout())
    }

    /// Sends a request and maps non-success statuses to errors (404 → not found)
    pub(crate) async fn execute(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        let logger = self.logger.scoped();
        let method = request.method;
        let url = request.url.clone();
        log_debug!(logger, "{} {}", method, url);

        let response = match self.network.request(request).await {
            Ok(response) => response,
            Err(e) => {
                log_error!(logger, "{} {} failed: {}", method, url, e.message);
                return Err(e.source("api_client"));
            }
        };

        if response.is_success() {
            log_debug!(logger, "{} {} -> {}", method, url, response.status_code);
            return Ok(response);
        }

        log_warn!(logger, "{} {} -> {}", method, url, response.status_code);
        if response.status_code == 404 {
            return Err(Error::not_found(url, None)
                .source("api_client")
                .metadata("status_code", serde_json::Value::from(404)));
        }

        let body = response.text();
        let detail = if body.trim().is_empty() {
            format!("HTTP {}", response.status_code)
        } else {
            format!("HTTP {}: {}", response.status_code, body.trim())
        };
        Err(Error::http(response.status_code, url, detail).source("api_client"))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, response: &NetworkResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| {
        Error::serialization(format!("Unexpected response from {}: {}", path, e)).source("api_client")
    })
}

/// Percent-encodes one user-supplied path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}
