// src/models/blog.rs

use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use super::Identified;
use crate::types::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Comma-separated
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,
    /// Minutes
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_time: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl BlogPost {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl Identified for BlogPost {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }
}
