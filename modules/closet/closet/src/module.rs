use std::sync::Arc;

use closet_sdk::ClosetClient;
use tracing::info;

use crate::config::ClosetConfig;
use crate::domain::account::{AccountService, AuthProvider};
use crate::domain::repo::{BlobStore, RecordStore};
use crate::domain::service::Service;
use crate::domain::session::SessionHub;
use crate::domain::wizard::Wizard;
use crate::local_client::LocalClient;

/// Wires configuration and backends into the closet's services.
pub struct ClosetModule {
    config: ClosetConfig,
    service: Arc<Service>,
    client: Arc<LocalClient>,
    sessions: SessionHub,
}

impl ClosetModule {
    #[must_use]
    pub fn new(
        config: ClosetConfig,
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        info!("Initializing closet module");
        let service = Arc::new(Service::new(blobs, records, config.service_config()));
        let client = Arc::new(LocalClient::new(Arc::clone(&service)));
        info!(
            submit_timeout_ms = config.submit_timeout_ms,
            verify_pair_items = config.verify_pair_items,
            "closet module initialized"
        );
        Self {
            config,
            service,
            client,
            sessions: SessionHub::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClosetConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn ClosetClient> {
        self.client.clone()
    }

    #[must_use]
    pub fn sessions(&self) -> SessionHub {
        self.sessions.clone()
    }

    /// A fresh wizard using this module's notice and image limits.
    #[must_use]
    pub fn new_wizard(&self) -> Wizard {
        Wizard::new(self.config.wizard_config())
    }

    /// Account service publishing into this module's session hub.
    #[must_use]
    pub fn accounts(&self, auth: Arc<dyn AuthProvider>) -> AccountService {
        AccountService::new(auth, self.sessions.clone())
    }
}
