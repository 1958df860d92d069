//! Database schema and migrations
//!
//! Migrations are embedded SQL files applied in version order, each in
//! its own transaction, and recorded in the `migrations` table.

use crate::error::Result;
use sqlx::{Connection, SqliteConnection};

/// Bring the schema on `conn` up to the latest version
pub async fn initialize_database(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    let current_version: i32 =
        sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM migrations")
            .fetch_one(&mut *conn)
            .await?;

    tracing::info!("Current database version: {}", current_version);

    apply_migrations(conn, current_version).await
}

async fn apply_migrations(conn: &mut SqliteConnection, current_version: i32) -> Result<()> {
    for &(version, sql) in MIGRATIONS {
        if version <= current_version {
            continue;
        }

        tracing::info!("Applying migration version {}", version);

        let mut tx = conn.begin().await?;

        // Statements are split on ';', so migration comments must not contain one
        for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query("INSERT INTO migrations (version) VALUES (?)")
            .bind(version)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
    }

    Ok(())
}

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("migrations/001_initial_schema.sql"))];

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_connection() -> SqliteConnection {
        SqliteConnection::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_database() {
        let mut conn = memory_connection().await;

        initialize_database(&mut conn).await.unwrap();

        let version: i32 = sqlx::query_scalar("SELECT MAX(version) FROM migrations")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(version, 1);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();

        for expected in ["categories", "documents", "subcategories"] {
            assert!(tables.iter().any(|t| t == expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_initialize_is_repeatable() {
        let mut conn = memory_connection().await;

        initialize_database(&mut conn).await.unwrap();
        initialize_database(&mut conn).await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM migrations")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn test_template_keys_are_per_user() {
        let mut conn = memory_connection().await;
        initialize_database(&mut conn).await.unwrap();

        let insert = "INSERT INTO categories (id, user_id, name, icon, background_color, created_at) \
                      VALUES ('finance', ?, 'Finance', 'wallet', '#16A34A', '2026-01-01T00:00:00Z')";

        sqlx::query(insert).bind("user-1").execute(&mut conn).await.unwrap();
        sqlx::query(insert).bind("user-2").execute(&mut conn).await.unwrap();
        assert!(sqlx::query(insert).bind("user-1").execute(&mut conn).await.is_err());
    }
}
