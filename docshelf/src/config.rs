//! Application configuration constants
//!
//! Central location for cache windows, resource limits and environment
//! variable names used throughout the application.

// ===== Identity =====

/// How long a fetched user id is trusted before asking the auth provider again (5 minutes)
pub const IDENTITY_CACHE_TTL_SECS: i64 = 300;

// ===== Database =====

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "docshelf.db";

/// Maximum pooled connections for the application pool
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before failing.
/// Concurrent first-run seeding relies on writers queueing instead of erroring.
pub const DB_BUSY_TIMEOUT_SECS: u64 = 5;

// ===== Blob Storage =====

/// Directory name for uploaded document blobs inside the data directory
pub const BLOB_DIR_NAME: &str = "blobs";

/// Maximum length in characters of a document's recorded file name
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Longest single path segment most filesystems accept, in bytes
pub const MAX_PATH_SEGMENT_BYTES: usize = 255;

/// Content type used when the caller declares none
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// ===== Environment =====

/// Overrides the data directory used by the binary
pub const ENV_DATA_DIR: &str = "DOCSHELF_DATA_DIR";

/// User id the binary treats as the signed-in user
pub const ENV_USER_ID: &str = "DOCSHELF_USER_ID";

/// Default data directory when `DOCSHELF_DATA_DIR` is unset
pub const DEFAULT_DATA_DIR: &str = ".docshelf";
