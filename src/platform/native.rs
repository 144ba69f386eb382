// src/platform/native.rs - reqwest-backed transport

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::platform::network::{
    HttpMethod, NetworkProvider, NetworkRequest, NetworkResponse, RequestBody,
};

/// Native network implementation
#[derive(Debug, Clone)]
pub struct NativeNetwork {
    client: reqwest::Client,
}

impl NativeNetwork {
    pub fn new(default_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(default_timeout)
            .user_agent(concat!("storefront-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl NetworkProvider for NativeNetwork {
    async fn request(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(bytes) => req.body(bytes),
            RequestBody::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.content_type)
                    .map_err(|e| Error::upload(None, format!("Invalid content type: {}", e)))?;
                req.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::network(&request.url, format!("HTTP request failed: {}", e)))?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                Error::network(&request.url, format!("Failed to read response body: {}", e))
            })?
            .to_vec();

        Ok(NetworkResponse {
            status_code,
            headers,
            body,
        })
    }
}
