use async_trait::async_trait;
use chrono::{DateTime, Utc};
use closet_sdk::models::{ImagePayload, ItemFilter, NewItem, OutfitPair, PersistedItem};
use url::Url;
use uuid::Uuid;

/// Stores raw image bytes and hands back a stable reference.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `image` under `key` and return the URL it can be fetched from.
    async fn store(&self, key: &str, image: &ImagePayload) -> anyhow::Result<Url>;
}

/// Item record as handed to the record store; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemRecord {
    pub owner_id: Uuid,
    pub image_url: Url,
    pub item: NewItem,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOutfitPair {
    pub owner_id: Uuid,
    pub top_url: Url,
    pub bottom_url: Url,
    pub created_at: DateTime<Utc>,
}

/// Document store for items and outfit pairs.
///
/// The store does not enforce pair uniqueness; callers check with
/// `find_outfit_pair` before `create_outfit_pair`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_item(&self, record: NewItemRecord) -> anyhow::Result<PersistedItem>;

    async fn list_items(
        &self,
        owner_id: Uuid,
        filter: &ItemFilter,
    ) -> anyhow::Result<Vec<PersistedItem>>;

    async fn find_item_by_image_url(
        &self,
        owner_id: Uuid,
        image_url: &Url,
    ) -> anyhow::Result<Option<PersistedItem>>;

    async fn find_outfit_pair(
        &self,
        owner_id: Uuid,
        top_url: &Url,
        bottom_url: &Url,
    ) -> anyhow::Result<Option<OutfitPair>>;

    async fn create_outfit_pair(&self, pair: NewOutfitPair) -> anyhow::Result<OutfitPair>;

    async fn list_outfit_pairs(&self, owner_id: Uuid) -> anyhow::Result<Vec<OutfitPair>>;
}
