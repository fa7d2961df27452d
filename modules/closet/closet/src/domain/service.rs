use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use closet_sdk::models::{
    Category, ImagePayload, ItemFilter, ItemSubmission, OutfitPair, PersistedItem, Session,
};
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::draft::{validate_image, validate_new_item};
use super::error::DomainError;
use super::fields::ClosetFields;
use super::repo::{BlobStore, NewItemRecord, NewOutfitPair, RecordStore};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub submit_timeout: Duration,
    pub verify_pair_items: bool,
    pub max_image_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_secs(30),
            verify_pair_items: true,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

pub struct Service {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    config: ServiceConfig,
}

fn u64_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Service {
    #[must_use]
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            blobs,
            records,
            config,
        }
    }

    /// Upload the image, then create the record pointing at it.
    ///
    /// Both calls together are bounded by `submit_timeout`. If the record
    /// cannot be created after a successful upload, the blob is left behind.
    ///
    /// # Errors
    /// - `DomainError::Validation` for an incomplete item or unusable image.
    /// - `DomainError::Storage` if the upload fails.
    /// - `DomainError::Persistence` if the record cannot be created.
    /// - `DomainError::Timeout` when `submit_timeout` expires.
    #[instrument(
        skip_all,
        fields(owner = %session.user_id(), category = %submission.item.category)
    )]
    pub async fn submit_item(
        &self,
        session: &Session,
        submission: ItemSubmission,
    ) -> Result<PersistedItem, DomainError> {
        validate_image(&submission.image, self.config.max_image_bytes)?;
        validate_new_item(&submission.item)?;

        let timeout = self.config.submit_timeout;
        let Ok(result) =
            tokio::time::timeout(timeout, self.store_and_create(session.user_id(), submission))
                .await
        else {
            warn!(timeout_ms = u64_millis(timeout), "item submission timed out");
            return Err(DomainError::Timeout {
                timeout_ms: u64_millis(timeout),
            });
        };
        result
    }

    async fn store_and_create(
        &self,
        owner_id: Uuid,
        submission: ItemSubmission,
    ) -> Result<PersistedItem, DomainError> {
        let key = blob_key(owner_id, &submission.image);
        let image_url = self
            .blobs
            .store(&key, &submission.image)
            .await
            .map_err(DomainError::Storage)?;
        debug!(%image_url, bytes = submission.image.len(), "image stored");

        let record = NewItemRecord {
            owner_id,
            image_url: image_url.clone(),
            item: submission.item,
            created_at: Utc::now(),
        };
        match self.records.create_item(record).await {
            Ok(item) => {
                info!(item_id = %item.id, "item created");
                Ok(item)
            }
            Err(e) => {
                warn!(%image_url, error = %e, "item record not created, stored image is orphaned");
                Err(DomainError::Persistence(e))
            }
        }
    }

    /// Items of the session user matching `filter`, newest first.
    ///
    /// # Errors
    /// Returns `DomainError::Persistence` if the record store fails.
    #[instrument(skip_all, fields(owner = %session.user_id()))]
    pub async fn list_items(
        &self,
        session: &Session,
        filter: &ItemFilter,
    ) -> Result<Vec<PersistedItem>, DomainError> {
        let mut items = self
            .records
            .list_items(session.user_id(), filter)
            .await
            .map_err(DomainError::Persistence)?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    /// Save a top + bottom pair unless the same pair already exists.
    ///
    /// # Errors
    /// - `DomainError::Validation` for identical URLs or, with verification
    ///   on, URLs that are not the user's own top and bottom items.
    /// - `DomainError::DuplicatePair` if the pair is already saved.
    /// - `DomainError::Persistence` if the record store fails.
    #[instrument(skip_all, fields(owner = %session.user_id(), %top_url, %bottom_url))]
    pub async fn save_outfit_pair(
        &self,
        session: &Session,
        top_url: &Url,
        bottom_url: &Url,
    ) -> Result<OutfitPair, DomainError> {
        let owner_id = session.user_id();
        if top_url == bottom_url {
            return Err(DomainError::validation(
                ClosetFields::BOTTOM_URL,
                "Please pick two different items.",
            ));
        }
        if self.config.verify_pair_items {
            self.require_item(owner_id, top_url, Category::Top, ClosetFields::TOP_URL)
                .await?;
            self.require_item(owner_id, bottom_url, Category::Bottom, ClosetFields::BOTTOM_URL)
                .await?;
        }

        let existing = self
            .records
            .find_outfit_pair(owner_id, top_url, bottom_url)
            .await
            .map_err(DomainError::Persistence)?;
        if let Some(pair) = existing {
            info!(pair_id = %pair.id, "outfit pair already saved");
            return Err(DomainError::DuplicatePair {
                top_url: top_url.clone(),
                bottom_url: bottom_url.clone(),
            });
        }

        let pair = self
            .records
            .create_outfit_pair(NewOutfitPair {
                owner_id,
                top_url: top_url.clone(),
                bottom_url: bottom_url.clone(),
                created_at: Utc::now(),
            })
            .await
            .map_err(DomainError::Persistence)?;
        info!(pair_id = %pair.id, "outfit pair saved");
        Ok(pair)
    }

    /// # Errors
    /// Returns `DomainError::Persistence` if the record store fails.
    #[instrument(skip_all, fields(owner = %session.user_id()))]
    pub async fn list_outfit_pairs(
        &self,
        session: &Session,
    ) -> Result<Vec<OutfitPair>, DomainError> {
        let mut pairs = self
            .records
            .list_outfit_pairs(session.user_id())
            .await
            .map_err(DomainError::Persistence)?;
        pairs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pairs)
    }

    async fn require_item(
        &self,
        owner_id: Uuid,
        url: &Url,
        category: Category,
        field: &str,
    ) -> Result<(), DomainError> {
        let item = self
            .records
            .find_item_by_image_url(owner_id, url)
            .await
            .map_err(DomainError::Persistence)?;
        match item {
            Some(item) if item.category == category => Ok(()),
            _ => Err(DomainError::validation(
                field,
                format!("Please choose one of your {category} items."),
            )),
        }
    }
}

/// `<owner>/<random>.<ext>`, the extension taken from the file name or the
/// content type.
fn blob_key(owner_id: Uuid, image: &ImagePayload) -> String {
    let from_name = image
        .file_name
        .as_deref()
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext);
    let ext = from_name
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(
            || {
                image
                    .content_type
                    .subtype()
                    .as_str()
                    .chars()
                    .take_while(char::is_ascii_alphanumeric)
                    .collect::<String>()
            },
            str::to_ascii_lowercase,
        );
    let ext = if ext.is_empty() { "bin".to_owned() } else { ext };
    format!("{owner_id}/{}.{ext}", Uuid::new_v4())
}

#[cfg(test)]
mod blob_key_tests {
    use super::*;

    #[test]
    fn extension_prefers_file_name() {
        let owner = Uuid::new_v4();
        let image = ImagePayload::new(vec![1], mime::IMAGE_PNG).with_file_name("Shirt.JPG");
        let key = blob_key(owner, &image);
        assert!(key.starts_with(&format!("{owner}/")));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn extension_falls_back_to_content_type() {
        let owner = Uuid::new_v4();
        let svg: mime::Mime = "image/svg+xml".parse().unwrap();
        assert!(blob_key(owner, &ImagePayload::new(vec![1], svg)).ends_with(".svg"));
        let odd = ImagePayload::new(vec![1], mime::IMAGE_GIF).with_file_name("noext");
        assert!(blob_key(owner, &odd).ends_with(".gif"));
    }
}
