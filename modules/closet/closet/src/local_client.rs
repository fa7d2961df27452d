use async_trait::async_trait;
use closet_sdk::{
    ClosetClient, ClosetError, ItemFilter, ItemSubmission, OutfitPair, PersistedItem, Session,
};
use std::sync::Arc;
use url::Url;

use crate::domain::service::Service;

/// In-process `ClosetClient` over the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ClosetClient for LocalClient {
    async fn submit_item(
        &self,
        session: &Session,
        submission: ItemSubmission,
    ) -> Result<PersistedItem, ClosetError> {
        self.service
            .submit_item(session, submission)
            .await
            .map_err(Into::into)
    }

    async fn list_items(
        &self,
        session: &Session,
        filter: &ItemFilter,
    ) -> Result<Vec<PersistedItem>, ClosetError> {
        self.service
            .list_items(session, filter)
            .await
            .map_err(Into::into)
    }

    async fn save_outfit_pair(
        &self,
        session: &Session,
        top_url: &Url,
        bottom_url: &Url,
    ) -> Result<OutfitPair, ClosetError> {
        self.service
            .save_outfit_pair(session, top_url, bottom_url)
            .await
            .map_err(Into::into)
    }

    async fn list_outfit_pairs(&self, session: &Session) -> Result<Vec<OutfitPair>, ClosetError> {
        self.service
            .list_outfit_pairs(session)
            .await
            .map_err(Into::into)
    }
}
