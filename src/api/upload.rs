// src/api/upload.rs

use crate::api::{decode, ApiClient};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::forms::LocalImage;
use crate::models::UploadResponse;
use crate::platform::{HttpMethod, MultipartFile, NetworkRequest};

/// Multipart field the asset server reads the file from
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct UploadApi {
    client: ApiClient,
}

impl UploadApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Uploads one image to the asset origin and returns its stored
    /// server-relative path (`/uploads/products/{filename}`).
    pub async fn upload_image(&self, image: &LocalImage) -> Result<String> {
        let config = self.client.config();
        let url = config.upload_endpoint();
        let request = NetworkRequest::new(HttpMethod::Post, url.clone())
            .header("Accept", "application/json")
            .timeout(config.request_timeout())
            .multipart(MultipartFile {
                field: IMAGE_FIELD.to_string(),
                filename: image.filename.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            });

        let response = self.client.execute(request).await.map_err(|e| {
            Error::upload(Some(image.filename.clone()), format!("Image upload failed: {}", e.message))
                .caused_by(&e)
                .source("upload_api")
        })?;

        let parsed: UploadResponse = decode(&url, &response)?;
        match parsed.filename() {
            Some(stored) => {
                tracing::info!(local = %image.filename, stored, "image uploaded");
                Ok(config.uploaded_image_path(stored))
            }
            None => Err(Error::upload(
                Some(image.filename.clone()),
                parsed
                    .message
                    .unwrap_or_else(|| "Failed to upload image".to_string()),
            )
            .source("upload_api")),
        }
    }
}
