//! Filesystem blob storage
//!
//! Stores document bytes under caller-chosen relative keys such as
//! "user-1/1700000000000-<uuid>-scan.pdf". Each blob gets a JSON sidecar
//! ("<key>.meta.json") recording content type, size and SHA-256.

use super::BlobStorage;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const METADATA_SUFFIX: &str = ".meta.json";
const TEMP_SUFFIX: &str = ".tmp";

/// Bytes the store may append to the last segment of a key on disk
pub const RESERVED_SUFFIX_BYTES: usize = METADATA_SUFFIX.len() + TEMP_SUFFIX.len();

/// Sidecar metadata written next to every blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub content_type: String,
    pub size: u64,
    pub sha256: String,
    pub stored_at: DateTime<Utc>,
}

/// Path-keyed blob store rooted at a directory
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a new blob store at the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the blob store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Blob store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Write data at `key`, replacing any previous blob
    pub async fn write(&self, key: &str, data: &[u8], content_type: &str) -> Result<BlobMetadata> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let metadata = BlobMetadata {
            content_type: content_type.to_string(),
            size: data.len() as u64,
            sha256: calculate_hash(data),
            stored_at: Utc::now(),
        };

        let encoded = serde_json::to_vec(&metadata)?;

        // Temp file + rename so readers never see a partial blob
        write_atomic(&path, data).await?;
        if let Err(e) = write_atomic(&sidecar_path(&path), &encoded).await {
            // A blob without its sidecar is unreadable through `metadata`
            discard(&path).await;
            return Err(e);
        }

        tracing::debug!("Wrote blob: {} ({} bytes)", key, data.len());

        Ok(metadata)
    }

    /// Read data from blob store
    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;

        if !fs::try_exists(&path).await? {
            return Err(AppError::BlobStore(format!("Blob not found: {}", key)));
        }

        let data = fs::read(&path).await?;

        tracing::debug!("Read blob: {} ({} bytes)", key, data.len());

        Ok(data)
    }

    /// Read the sidecar metadata of a blob
    pub async fn metadata(&self, key: &str) -> Result<BlobMetadata> {
        let path = sidecar_path(&self.resolve(key)?);

        if !fs::try_exists(&path).await? {
            return Err(AppError::BlobStore(format!("Blob not found: {}", key)));
        }

        let raw = fs::read(&path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Check if a blob exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    /// Delete a blob and its sidecar
    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;

        for target in [sidecar_path(&path), path] {
            if fs::try_exists(&target).await? {
                fs::remove_file(&target).await?;
            }
        }

        tracing::debug!("Deleted blob: {}", key);

        Ok(())
    }

    /// Map a relative key to a file under the root, refusing anything that escapes it
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && !key.ends_with(METADATA_SUFFIX)
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !valid {
            return Err(AppError::BlobStore(format!("Invalid blob key: {}", key)));
        }

        Ok(self.root.join(relative))
    }

    /// Get blob store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStorage for BlobStore {
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<String> {
        self.write(path, data, content_type).await?;
        Ok(path.to_string())
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        for path in paths {
            self.delete(path).await?;
        }
        Ok(())
    }
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(METADATA_SUFFIX);
    PathBuf::from(name)
}

async fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(TEMP_SUFFIX);
    let temp_path = PathBuf::from(temp_name);

    let result = write_then_rename(&temp_path, path, data).await;
    if result.is_err() {
        discard(&temp_path).await;
    }
    result
}

async fn write_then_rename(temp_path: &Path, path: &Path, data: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await?;
    Ok(())
}

/// Best-effort removal of a file left by a failed write
async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove partial file {:?}: {}", path, e);
        }
    }
}

/// Calculate SHA-256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
