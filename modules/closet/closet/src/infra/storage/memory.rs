//! Process-local stores used by tests and throwaway runs.
//!
//! Both stores can be told to fail, which is how the service's storage and
//! persistence error paths are exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use closet_sdk::models::{ImagePayload, ItemFilter, OutfitPair, PersistedItem};
use parking_lot::{Mutex, RwLock};
use url::Url;
use uuid::Uuid;

use crate::domain::repo::{BlobStore, NewItemRecord, NewOutfitPair, RecordStore};

#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<Url, ImagePayload>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every `store` call wait this long first.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    #[must_use]
    pub fn get(&self, url: &Url) -> Option<ImagePayload> {
        self.blobs.read().get(url).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn store(&self, key: &str, image: &ImagePayload) -> anyhow::Result<Url> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            bail!("blob store unavailable");
        }
        let url = Url::parse(&format!("memory://blobs/{key}"))
            .with_context(|| format!("invalid blob key '{key}'"))?;
        self.blobs.write().insert(url.clone(), image.clone());
        Ok(url)
    }
}

#[derive(Default)]
struct Records {
    items: Vec<PersistedItem>,
    pairs: Vec<OutfitPair>,
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Records>,
    failing: AtomicBool,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every stored item regardless of owner, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<PersistedItem> {
        self.records.read().items.clone()
    }

    #[must_use]
    pub fn pairs(&self) -> Vec<OutfitPair> {
        self.records.read().pairs.clone()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("record store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_item(&self, record: NewItemRecord) -> anyhow::Result<PersistedItem> {
        self.check()?;
        let NewItemRecord {
            owner_id,
            image_url,
            item,
            created_at,
        } = record;
        let persisted = PersistedItem {
            id: Uuid::new_v4(),
            owner_id,
            image_url,
            category: item.category,
            sub_type: item.sub_type,
            pants_type: item.pants_type,
            attribute_tags: item.attribute_tags,
            colors: item.colors,
            created_at,
        };
        self.records.write().items.push(persisted.clone());
        Ok(persisted)
    }

    async fn list_items(
        &self,
        owner_id: Uuid,
        filter: &ItemFilter,
    ) -> anyhow::Result<Vec<PersistedItem>> {
        self.check()?;
        Ok(self
            .records
            .read()
            .items
            .iter()
            .filter(|i| i.owner_id == owner_id && filter.matches(i))
            .cloned()
            .collect())
    }

    async fn find_item_by_image_url(
        &self,
        owner_id: Uuid,
        image_url: &Url,
    ) -> anyhow::Result<Option<PersistedItem>> {
        self.check()?;
        Ok(self
            .records
            .read()
            .items
            .iter()
            .find(|i| i.owner_id == owner_id && &i.image_url == image_url)
            .cloned())
    }

    async fn find_outfit_pair(
        &self,
        owner_id: Uuid,
        top_url: &Url,
        bottom_url: &Url,
    ) -> anyhow::Result<Option<OutfitPair>> {
        self.check()?;
        Ok(self
            .records
            .read()
            .pairs
            .iter()
            .find(|p| {
                p.owner_id == owner_id && &p.top_url == top_url && &p.bottom_url == bottom_url
            })
            .cloned())
    }

    async fn create_outfit_pair(&self, pair: NewOutfitPair) -> anyhow::Result<OutfitPair> {
        self.check()?;
        let pair = OutfitPair {
            id: Uuid::new_v4(),
            owner_id: pair.owner_id,
            top_url: pair.top_url,
            bottom_url: pair.bottom_url,
            created_at: pair.created_at,
        };
        self.records.write().pairs.push(pair.clone());
        Ok(pair)
    }

    async fn list_outfit_pairs(&self, owner_id: Uuid) -> anyhow::Result<Vec<OutfitPair>> {
        self.check()?;
        Ok(self
            .records
            .read()
            .pairs
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
