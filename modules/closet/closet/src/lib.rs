//! Closet Module Implementation
//!
//! The public API is defined in `closet-sdk` and re-exported here.

pub use closet_sdk::{
    AttributeTag, BaseColor, Category, ClosetClient, ClosetError, ColorToken, ImagePayload,
    ItemFilter, ItemSubmission, NewItem, OutfitPair, PantsType, PersistedItem, Session, Shade,
    SubType, TagGroup,
};

pub mod module;
pub use module::ClosetModule;

pub mod local_client;
pub use local_client::LocalClient;

pub mod config;
pub use config::ClosetConfig;

pub mod domain;
pub use domain::error::DomainError;
pub use domain::wizard::{Wizard, WizardConfig, WizardPhase, WizardStep};

pub mod infra;
