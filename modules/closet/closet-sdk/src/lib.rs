//! Closet SDK
//!
//! This crate provides the public API for the closet module:
//! - `ClosetClient` trait for submitting and listing wardrobe items and outfit pairs
//! - Model types (`Category`, `SubType`, `ColorToken`, `PersistedItem`, ...)
//! - Error type (`ClosetError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::ClosetClient;
pub use errors::ClosetError;
pub use models::{
    AttributeTag, BaseColor, Category, ColorToken, ImagePayload, ItemFilter, ItemSubmission,
    NewItem, OutfitPair, PantsType, ParseModelError, PersistedItem, Session, Shade, SubType,
    TagGroup,
};
