//! Document upload pipeline
//!
//! Blob first, then the metadata row. There is no transaction spanning
//! both stores: if the row cannot be written the blob is removed again,
//! and only the row's error reaches the caller.

use crate::config;
use crate::database::{Document, NewDocument, RemoteStore};
use crate::error::{AppError, Result};
use crate::storage::{BlobStorage, RESERVED_SUFFIX_BYTES};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// A picked file ready for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Where an uploaded document is filed
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub folder_id: Option<String>,
}

/// Service for uploading documents
#[derive(Clone)]
pub struct DocumentUploadService {
    store: Arc<dyn RemoteStore>,
    blobs: Arc<dyn BlobStorage>,
}

impl DocumentUploadService {
    pub fn new(store: Arc<dyn RemoteStore>, blobs: Arc<dyn BlobStorage>) -> Self {
        Self { store, blobs }
    }

    /// Upload `file` for `user_id` and record it under `placement`
    pub async fn upload_document(
        &self,
        file: UploadFile,
        user_id: &str,
        placement: Placement,
    ) -> Result<Document> {
        const OP: &str = "upload_document";

        tracing::info!(
            "Uploading document: {} for user: {} (size: {} bytes)",
            file.file_name,
            user_id,
            file.data.len()
        );

        validate_user_id(user_id).map_err(|e| e.during(OP))?;
        let safe_name = sanitize_filename(&file.file_name);
        if safe_name.is_empty() {
            return Err(AppError::InvalidInput("empty file name".to_string()).during(OP));
        }

        let mime_type = file
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| config::DEFAULT_MIME_TYPE.to_string());
        let storage_key = storage_key(user_id, &safe_name);

        let storage_path = self
            .blobs
            .upload(&storage_key, &file.data, &mime_type)
            .await
            .map_err(|e| e.during(OP))?;

        let record = NewDocument {
            user_id: user_id.to_string(),
            category_id: placement.category_id,
            subcategory_id: placement.subcategory_id,
            folder_id: placement.folder_id,
            file_name: safe_name,
            file_size: file.data.len() as i64,
            mime_type,
            storage_path: storage_path.clone(),
        };

        match self.store.insert_document(&record).await {
            Ok(document) => {
                tracing::info!("Document uploaded: {}", document.id);
                Ok(document)
            }
            Err(e) => {
                tracing::warn!("Document record failed, removing blob {}: {}", storage_path, e);
                if let Err(cleanup) = self.blobs.remove(&[storage_path.clone()]).await {
                    tracing::warn!("Compensating removal of {} failed: {}", storage_path, cleanup);
                }
                Err(e.during(OP))
            }
        }
    }
}

/// Collision-resistant key under the user's namespace.
///
/// The name is cut on a char boundary so the last segment, plus whatever
/// the blob store appends, stays within one filesystem name.
fn storage_key(user_id: &str, file_name: &str) -> String {
    let prefix = format!(
        "{}-{}-",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    );
    let budget = config::MAX_PATH_SEGMENT_BYTES - RESERVED_SUFFIX_BYTES - prefix.len();

    format!("{}/{}{}", user_id, prefix, truncate_to_bytes(file_name, budget))
}

fn truncate_to_bytes(name: &str, max_bytes: usize) -> &str {
    if name.len() <= max_bytes {
        return name;
    }

    let mut end = max_bytes;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// The user id becomes a directory name, so it must be a single plain segment
fn validate_user_id(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= config::MAX_PATH_SEGMENT_BYTES
        && user_id != "."
        && user_id != ".."
        && !user_id.contains(['/', '\\', '\0']);

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("invalid user id: {:?}", user_id)))
    }
}

/// Sanitize filename to prevent path traversal attacks
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(config::MAX_FILE_NAME_LENGTH)
        .collect::<String>()
        .trim()
        .to_string()
}
