// src/models/image.rs

use serde::{Deserialize, Serialize};

/// Response of the primary-image lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response of `POST /api/upload/image` on the asset origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<UploadData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadData {
    pub filename: String,
}

impl UploadResponse {
    /// Stored filename of a successful upload
    pub fn filename(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.data
            .as_ref()
            .map(|data| data.filename.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_filename() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success": true, "data": {"filename": "a1.png"}}"#).unwrap();
        assert_eq!(ok.filename(), Some("a1.png"));

        let failed: UploadResponse =
            serde_json::from_str(r#"{"success": false, "data": {"filename": "a1.png"}}"#).unwrap();
        assert_eq!(failed.filename(), None);

        let no_data: UploadResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(no_data.filename(), None);
    }
}
