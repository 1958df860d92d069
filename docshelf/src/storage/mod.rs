//! Storage module
//!
//! Provides blob storage for uploaded document bytes.

pub mod blob_store;

pub use blob_store::{BlobMetadata, BlobStore, RESERVED_SUFFIX_BYTES};

use crate::error::Result;
use async_trait::async_trait;

/// Blob collaborator used by the upload pipeline.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `data` at `path` and return the stored path.
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<String>;

    /// Remove every listed path. Missing paths are not an error.
    async fn remove(&self, paths: &[String]) -> Result<()>;
}
