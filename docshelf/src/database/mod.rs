//! Database module
//!
//! Taxonomy and document rows live in one SQLite file. Engines reach it
//! through the [`RemoteStore`] seam; [`Repository`] is the SQLite side.

pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;
pub use store::RemoteStore;

use crate::config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, Connection, SqlitePool};
use std::path::Path;
use std::time::Duration;

/// Open the database at `db_path`, migrating it first.
///
/// Migrations run on a lone connection that is closed before the pool
/// opens. Pooled connections wait out each other's write locks for
/// `DB_BUSY_TIMEOUT_SECS`, which is what lets concurrent seeding settle
/// on the primary key instead of failing with "database is locked".
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening database at: {:?}", db_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config::DB_BUSY_TIMEOUT_SECS));

    let mut conn = options.connect().await?;
    initialize_database(&mut conn).await?;
    conn.close().await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config::DB_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    tracing::info!("Database ready");

    Ok(pool)
}
