// src/forms/image.rs - Committed or pending image reference

use std::path::Path;

use crate::api::UploadApi;
use crate::error::{Error, Result, ResultExt};

/// An image picked locally and not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for LocalImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl LocalImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::upload(None, format!("Not a file: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;

        Ok(Self::new(filename, bytes))
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Image field of an entity form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Server-relative path already stored by the backend
    Committed(String),
    Pending(LocalImage),
}

impl ImageRef {
    /// Committed reference for a stored path; blank paths mean no image
    pub fn existing(path: &str) -> Option<Self> {
        let path = path.trim();
        (!path.is_empty()).then(|| Self::Committed(path.to_string()))
    }

    pub fn is_present(&self) -> bool {
        match self {
            Self::Committed(path) => !path.trim().is_empty(),
            Self::Pending(_) => true,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Stored path of this image, uploading it first when pending
    pub async fn resolve(&self, uploads: &UploadApi) -> Result<String> {
        match self {
            Self::Committed(path) => Ok(path.clone()),
            Self::Pending(local) => uploads.upload_image(local).await,
        }
    }
}
