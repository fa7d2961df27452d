//! Filesystem backend rooted at the closet home directory.
//!
//! Layout:
//! ```text
//! <home>/blobs/<uuid>.<ext>   image bytes
//! <home>/closet.json          items and outfit pairs
//! ```
//! `closet.json` is rewritten whole on every change through a temporary file
//! and a rename, so readers never observe a half-written document.

pub mod entity;
pub mod mapper;


use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use closet_sdk::models::{ImagePayload, ItemFilter, OutfitPair, PersistedItem};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use self::entity::{DOCUMENT_VERSION, Document, ItemEntity, PairEntity};
use crate::domain::repo::{BlobStore, NewItemRecord, NewOutfitPair, RecordStore};

pub const BLOBS_DIR: &str = "blobs";
pub const DOCUMENT_FILE: &str = "closet.json";

/// Write `bytes` next to `path` and move it into place.
async fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to move {} into place", path.display()))?;
    Ok(())
}

pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    /// # Errors
    /// Returns an error if `home` cannot be made absolute.
    pub fn new(home: impl AsRef<Path>) -> anyhow::Result<Self> {
        let home = std::path::absolute(home.as_ref())
            .with_context(|| format!("invalid home directory {}", home.as_ref().display()))?;
        Ok(Self {
            dir: home.join(BLOBS_DIR),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    async fn store(&self, key: &str, image: &ImagePayload) -> anyhow::Result<Url> {
        // Only the last key segment names the file; owners share one directory.
        let name = key.rsplit('/').next().unwrap_or_default();
        if name.is_empty() || name.starts_with('.') {
            bail!("invalid blob key '{key}'");
        }
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.dir.join(name);
        write_atomic(&path, &image.bytes).await?;
        debug!(path = %path.display(), "blob written");
        Url::from_file_path(&path).map_err(|()| anyhow!("not a file URL: {}", path.display()))
    }
}

pub struct FsRecordStore {
    path: PathBuf,
    // Serialises read-modify-write cycles on the document.
    lock: Mutex<()>,
}

impl FsRecordStore {
    #[must_use]
    pub fn new(home: impl AsRef<Path>) -> Self {
        Self {
            path: home.as_ref().join(DOCUMENT_FILE),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> anyhow::Result<Document> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let doc: Document = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        if doc.version != DOCUMENT_VERSION {
            bail!(
                "unsupported {} version {} (expected {DOCUMENT_VERSION})",
                self.path.display(),
                doc.version
            );
        }
        Ok(doc)
    }

    async fn save(&self, doc: &Document) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(doc).context("failed to encode closet document")?;
        write_atomic(&self.path, &bytes).await
    }

    fn items_of(doc: Document, owner_id: Uuid) -> anyhow::Result<Vec<PersistedItem>> {
        doc.items
            .into_iter()
            .filter(|i| i.owner_id == owner_id)
            .map(PersistedItem::try_from)
            .collect()
    }
}

#[async_trait]
impl RecordStore for FsRecordStore {
    async fn create_item(&self, record: NewItemRecord) -> anyhow::Result<PersistedItem> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
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
        doc.items.push(ItemEntity::from(&persisted));
        self.save(&doc).await?;
        Ok(persisted)
    }

    async fn list_items(
        &self,
        owner_id: Uuid,
        filter: &ItemFilter,
    ) -> anyhow::Result<Vec<PersistedItem>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        let mut items = Self::items_of(doc, owner_id)?;
        items.retain(|i| filter.matches(i));
        Ok(items)
    }

    async fn find_item_by_image_url(
        &self,
        owner_id: Uuid,
        image_url: &Url,
    ) -> anyhow::Result<Option<PersistedItem>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        doc.items
            .into_iter()
            .find(|i| i.owner_id == owner_id && &i.image_url == image_url)
            .map(PersistedItem::try_from)
            .transpose()
    }

    async fn find_outfit_pair(
        &self,
        owner_id: Uuid,
        top_url: &Url,
        bottom_url: &Url,
    ) -> anyhow::Result<Option<OutfitPair>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .pairs
            .into_iter()
            .find(|p| {
                p.owner_id == owner_id && &p.top_url == top_url && &p.bottom_url == bottom_url
            })
            .map(OutfitPair::from))
    }

    async fn create_outfit_pair(&self, pair: NewOutfitPair) -> anyhow::Result<OutfitPair> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let pair = OutfitPair {
            id: Uuid::new_v4(),
            owner_id: pair.owner_id,
            top_url: pair.top_url,
            bottom_url: pair.bottom_url,
            created_at: pair.created_at,
        };
        doc.pairs.push(PairEntity::from(&pair));
        self.save(&doc).await?;
        Ok(pair)
    }

    async fn list_outfit_pairs(&self, owner_id: Uuid) -> anyhow::Result<Vec<OutfitPair>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .pairs
            .into_iter()
            .filter(|p| p.owner_id == owner_id)
            .map(OutfitPair::from)
            .collect())
    }
}
