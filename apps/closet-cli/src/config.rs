//! Layered application configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML file given with
//! `--config`, `CLOSET__*` environment variables, command line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use closet::ClosetConfig;
use closet::Session;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::home_dir::{self, HomeDirError};

pub const ENV_PREFIX: &str = "CLOSET__";

/// Owner of everything the CLI stores. There is no real sign-in.
pub const DEFAULT_LOCAL_USER_ID: Uuid = Uuid::from_u128(0x0c10_5e70_0000_4000_8000_0000_0000_0001);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `closet=debug,warn`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalUserConfig {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

impl Default for LocalUserConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_LOCAL_USER_ID,
            email: "me@localhost".to_owned(),
            display_name: None,
        }
    }
}

impl LocalUserConfig {
    #[must_use]
    pub fn session(&self) -> Session {
        let session = Session::new(self.id, self.email.clone());
        match &self.display_name {
            Some(name) => session.with_display_name(name.clone()),
            None => session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where blobs and `closet.json` live. Defaults to `~/.closet`.
    pub home_dir: Option<String>,
    pub local_user: LocalUserConfig,
    pub logging: LoggingConfig,
    pub closet: ClosetConfig,
}

impl AppConfig {
    /// Build the layered configuration.
    ///
    /// # Errors
    /// Fails if `path` is given but missing, or if any layer does not match
    /// the configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .extract()
            .context("invalid configuration")
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Command line flags win over every file and environment layer.
    pub fn apply_cli_overrides(&mut self, home: Option<&Path>, verbose: u8) {
        if let Some(home) = home {
            self.home_dir = Some(home.to_string_lossy().into_owned());
        }
        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// # Errors
    /// Returns `HomeDirError` if the home cannot be resolved or created.
    pub fn resolve_home(&self, create: bool) -> Result<PathBuf, HomeDirError> {
        home_dir::resolve_home_dir(self.home_dir.as_deref(), create)
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|_jail| {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg, AppConfig::default());
            assert_eq!(cfg.local_user.id, DEFAULT_LOCAL_USER_ID);
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "closet.yaml",
                r"
home_dir: /srv/closet
logging:
  format: json
closet:
  notice_ttl_ms: 1500
  verify_pair_items: false
",
            )?;
            jail.set_env("CLOSET__CLOSET__NOTICE_TTL_MS", "750");
            jail.set_env("CLOSET__LOCAL_USER__EMAIL", "ann@example.com");

            let cfg = AppConfig::load(Some(Path::new("closet.yaml"))).unwrap();

            assert_eq!(cfg.home_dir.as_deref(), Some("/srv/closet"));
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.closet.notice_ttl_ms, 750);
            assert!(!cfg.closet.verify_pair_items);
            assert_eq!(cfg.closet.submit_timeout_ms, 30_000);
            assert_eq!(cfg.local_user.email, "ann@example.com");
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("closet.yaml", "closet:\n  notice_ttl: 5\n")?;
            assert!(AppConfig::load(Some(Path::new("closet.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(Some(Path::new("/tmp/closet-home")), 2);
        assert_eq!(cfg.home_dir.as_deref(), Some("/tmp/closet-home"));
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn yaml_dump_mentions_sections() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("local_user"));
        assert!(yaml.contains("notice_ttl_ms"));
    }
}
