//! Error types for DocShelf
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to callers as plain messages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A row with the same key already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{operation}: {id} not found or not owned by caller")]
    NotFoundOrForbidden { operation: &'static str, id: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Blob store error: {0}")]
    BlobStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Tag this error with the operation that was running when it occurred.
    ///
    /// Errors that already name their operation are returned as-is.
    pub fn during(self, operation: &'static str) -> Self {
        match self {
            AppError::Operation { .. } | AppError::NotFoundOrForbidden { .. } => self,
            other => AppError::Operation {
                operation,
                source: Box::new(other),
            },
        }
    }

    /// True when the store rejected a write because the row already exists.
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            AppError::Conflict(_) => true,
            AppError::Database(sqlx::Error::Database(db)) => {
                // 1555 = SQLITE_CONSTRAINT_PRIMARYKEY, 2067 = SQLITE_CONSTRAINT_UNIQUE
                db.is_unique_violation()
                    || matches!(db.code().as_deref(), Some("1555") | Some("2067"))
            }
            AppError::Operation { source, .. } => source.is_duplicate_key(),
            _ => false,
        }
    }

    /// Name of the failing operation, if one was attached.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            AppError::Operation { operation, .. } => Some(*operation),
            AppError::NotFoundOrForbidden { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
