//! `ClosetClient` trait definition.
//!
//! This trait defines the public API for the closet module.
//! All methods take the `Session` of the signed-in user; items and pairs are
//! always scoped to that user.

use async_trait::async_trait;
use url::Url;

use crate::errors::ClosetError;
use crate::models::{ItemFilter, ItemSubmission, OutfitPair, PersistedItem, Session};

/// Public API trait for the closet module.
///
/// The intake wizard talks to the closet exclusively through this trait:
/// ```ignore
/// let item = client.submit_item(&session, submission).await?;
/// let tops = client.list_items(&session, &ItemFilter::category(Category::Top)).await?;
/// ```
#[async_trait]
pub trait ClosetClient: Send + Sync {
    /// Store the image, then create the item record referencing it.
    async fn submit_item(
        &self,
        session: &Session,
        submission: ItemSubmission,
    ) -> Result<PersistedItem, ClosetError>;

    /// List the user's items matching `filter`, newest first.
    async fn list_items(
        &self,
        session: &Session,
        filter: &ItemFilter,
    ) -> Result<Vec<PersistedItem>, ClosetError>;

    /// Save a top + bottom combination.
    /// Fails with `DuplicatePair` if the same pair is already saved.
    async fn save_outfit_pair(
        &self,
        session: &Session,
        top_url: &Url,
        bottom_url: &Url,
    ) -> Result<OutfitPair, ClosetError>;

    /// List the user's saved pairs, newest first.
    async fn list_outfit_pairs(&self, session: &Session) -> Result<Vec<OutfitPair>, ClosetError>;
}
