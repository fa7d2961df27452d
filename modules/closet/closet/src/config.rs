//! Configuration for the closet module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;
use crate::domain::wizard::WizardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClosetConfig {
    /// How long a validation or failure notice stays visible.
    pub notice_ttl_ms: u64,

    /// Upper bound for image upload plus record creation.
    pub submit_timeout_ms: u64,

    /// Require outfit pair URLs to reference the user's own top and bottom items.
    pub verify_pair_items: bool,

    /// Largest accepted image payload.
    pub max_image_bytes: usize,
}

impl Default for ClosetConfig {
    fn default() -> Self {
        Self {
            notice_ttl_ms: 3_000,
            submit_timeout_ms: 30_000,
            verify_pair_items: true,
            max_image_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl ClosetConfig {
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            submit_timeout: self.submit_timeout(),
            verify_pair_items: self.verify_pair_items,
            max_image_bytes: self.max_image_bytes,
        }
    }

    #[must_use]
    pub fn wizard_config(&self) -> WizardConfig {
        WizardConfig {
            notice_ttl: self.notice_ttl(),
            max_image_bytes: self.max_image_bytes,
            submit_timeout: self.submit_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ClosetConfig::default();
        assert_eq!(cfg.notice_ttl(), Duration::from_secs(3));
        assert_eq!(cfg.submit_timeout(), Duration::from_secs(30));
        assert!(cfg.verify_pair_items);
    }

    #[test]
    fn submit_timeout_reaches_service_and_wizard() {
        let cfg = ClosetConfig {
            submit_timeout_ms: 1_500,
            ..ClosetConfig::default()
        };
        assert_eq!(cfg.service_config().submit_timeout, Duration::from_millis(1_500));
        assert_eq!(cfg.wizard_config().submit_timeout, Duration::from_millis(1_500));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: ClosetConfig = serde_json::from_str(r#"{"notice_ttl_ms": 500}"#).unwrap();
        assert_eq!(cfg.notice_ttl(), Duration::from_millis(500));
        assert_eq!(cfg.submit_timeout_ms, ClosetConfig::default().submit_timeout_ms);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<ClosetConfig>(r#"{"notice_ttl": 500}"#);
        assert!(result.is_err());
    }
}
