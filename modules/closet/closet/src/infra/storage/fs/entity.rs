//! On-disk shape of `closet.json`.
//!
//! Enum-valued fields are kept in their canonical string spelling so the file
//! stays readable and tolerant of reordered variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    #[serde(default)]
    pub items: Vec<ItemEntity>,
    #[serde(default)]
    pub pairs: Vec<PairEntity>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            items: Vec::new(),
            pairs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub image_url: Url,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pants_type: Option<String>,
    #[serde(default)]
    pub attribute_tags: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub top_url: Url,
    pub bottom_url: Url,
    pub created_at: DateTime<Utc>,
}
