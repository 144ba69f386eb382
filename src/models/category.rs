// src/models/category.rs

use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use super::Identified;
use crate::types::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Server-relative logo path, e.g. `/images/logo/shoes.png`
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo: String,
}

impl Identified for Category {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }
}
