//! Blob and record store backends.

pub mod fs;
pub mod memory;

pub use fs::{FsBlobStore, FsRecordStore};
pub use memory::{InMemoryBlobStore, InMemoryRecordStore};
