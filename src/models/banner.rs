// src/models/banner.rs

use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use super::Identified;
use crate::types::EntityId;

/// Home page banner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link_name: String,
}

impl Identified for Banner {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }
}
