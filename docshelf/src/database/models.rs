//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde so screens and the CLI can serialize them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Top level of the taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub background_color: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Second level of the taxonomy, owned by a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Metadata record for an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub folder_id: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    /// Blob key, always under the owning user's namespace
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a category row
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub background_color: String,
    pub is_custom: bool,
}

/// Insert payload for a subcategory row
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubcategory {
    pub id: String,
    pub category_id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub is_custom: bool,
}

/// Insert payload for a document metadata row
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub user_id: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub folder_id: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub storage_path: String,
}

/// Narrows a live-document listing
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
}
