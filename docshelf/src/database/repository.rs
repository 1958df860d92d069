//! Repository layer for database operations
//!
//! SQLite implementation of [`RemoteStore`] plus the direct-creation helpers
//! for custom taxonomy rows. Both cascade procedures run inside a single
//! transaction, so a cascade is either fully applied or not at all.

use super::models::*;
use super::store::RemoteStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a user-defined category
    pub async fn create_custom_category(
        &self,
        user_id: &str,
        name: &str,
        icon: &str,
        background_color: &str,
    ) -> Result<Category> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, user_id, name, icon, background_color, is_custom, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(name)
        .bind(icon)
        .bind(background_color)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created custom category: {} for user: {}", id, user_id);
        Ok(category)
    }

    /// Create a user-defined subcategory under an existing category
    pub async fn create_custom_subcategory(
        &self,
        user_id: &str,
        category_id: &str,
        name: &str,
        icon: &str,
    ) -> Result<Subcategory> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let subcategory = sqlx::query_as::<_, Subcategory>(
            r#"
            INSERT INTO subcategories (id, category_id, user_id, name, icon, is_custom, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(category_id)
        .bind(user_id)
        .bind(name)
        .bind(icon)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created custom subcategory: {} in category: {}", id, category_id);
        Ok(subcategory)
    }

    /// Get a category by ID, including soft-deleted rows
    pub async fn get_category(&self, user_id: &str, id: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// List live subcategories of a category
    pub async fn list_subcategories(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<Subcategory>> {
        let subcategories = sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT * FROM subcategories
            WHERE user_id = ? AND category_id = ? AND deleted_at IS NULL
            ORDER BY is_custom ASC, created_at ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    /// Get a document by ID, including soft-deleted rows
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    /// List live documents, newest first
    pub async fn list_live_documents(
        &self,
        user_id: &str,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM documents WHERE deleted_at IS NULL AND user_id = ");
        builder.push_bind(user_id.to_string());

        if let Some(category_id) = &filter.category_id {
            builder
                .push(" AND category_id = ")
                .push_bind(category_id.clone());
        }
        if let Some(subcategory_id) = &filter.subcategory_id {
            builder
                .push(" AND subcategory_id = ")
                .push_bind(subcategory_id.clone());
        }
        builder.push(" ORDER BY uploaded_at DESC");

        let documents = builder
            .build_query_as::<Document>()
            .fetch_all(&self.pool)
            .await?;

        Ok(documents)
    }
}

#[async_trait]
impl RemoteStore for Repository {
    async fn count_default_categories(&self, user_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories WHERE user_id = ? AND is_custom = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert_categories(&self, rows: &[NewCategory]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO categories (id, user_id, name, icon, background_color, is_custom, created_at) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.id.clone())
                .push_bind(row.user_id.clone())
                .push_bind(row.name.clone())
                .push_bind(row.icon.clone())
                .push_bind(row.background_color.clone())
                .push_bind(row.is_custom)
                .push_bind(now);
        });

        builder.build().execute(&self.pool).await?;

        tracing::debug!("Inserted {} categories", rows.len());
        Ok(())
    }

    async fn insert_subcategories(&self, rows: &[NewSubcategory]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO subcategories (id, category_id, user_id, name, icon, is_custom, created_at) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.id.clone())
                .push_bind(row.category_id.clone())
                .push_bind(row.user_id.clone())
                .push_bind(row.name.clone())
                .push_bind(row.icon.clone())
                .push_bind(row.is_custom)
                .push_bind(now);
        });

        builder.build().execute(&self.pool).await?;

        tracing::debug!("Inserted {} subcategories", rows.len());
        Ok(())
    }

    async fn live_document_category_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT category_id FROM documents
            WHERE user_id = ? AND deleted_at IS NULL AND category_id IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn live_document_subcategory_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT subcategory_id FROM documents
            WHERE user_id = ? AND deleted_at IS NULL AND subcategory_id IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn list_custom_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE user_id = ? AND is_custom = 1 AND deleted_at IS NULL
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn list_custom_subcategories(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<Subcategory>> {
        let subcategories = sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT * FROM subcategories
            WHERE user_id = ? AND category_id = ? AND is_custom = 1 AND deleted_at IS NULL
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    async fn count_category_documents(&self, user_id: &str, category_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM documents
            WHERE user_id = ? AND category_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn deleted_default_category_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT id FROM categories
            WHERE user_id = ? AND is_custom = 0 AND deleted_at IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn deleted_default_subcategory_ids(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT id FROM subcategories
            WHERE user_id = ? AND category_id = ? AND is_custom = 0 AND deleted_at IS NOT NULL
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn insert_document(&self, doc: &NewDocument) -> Result<Document> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                id, user_id, category_id, subcategory_id, folder_id,
                file_name, file_size, mime_type, storage_path, uploaded_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&doc.user_id)
        .bind(doc.category_id.as_deref())
        .bind(doc.subcategory_id.as_deref())
        .bind(doc.folder_id.as_deref())
        .bind(&doc.file_name)
        .bind(doc.file_size)
        .bind(&doc.mime_type)
        .bind(&doc.storage_path)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created document: {} for user: {}", id, doc.user_id);
        Ok(document)
    }

    async fn soft_delete_category(
        &self,
        category_id: &str,
        user_id: &str,
    ) -> Result<Option<bool>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            r#"
            UPDATE categories SET deleted_at = ?
            WHERE id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(category_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            tx.rollback().await?;
            return Ok(Some(false));
        }

        let documents = sqlx::query(
            r#"
            UPDATE documents SET deleted_at = ?
            WHERE user_id = ? AND deleted_at IS NULL
              AND (
                category_id = ?
                OR subcategory_id IN (
                    SELECT id FROM subcategories WHERE user_id = ? AND category_id = ?
                )
              )
            "#,
        )
        .bind(now)
        .bind(user_id)
        .bind(category_id)
        .bind(user_id)
        .bind(category_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let subcategories = sqlx::query(
            r#"
            UPDATE subcategories SET deleted_at = ?
            WHERE user_id = ? AND category_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(user_id)
        .bind(category_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            "Soft deleted category: {} ({} subcategories, {} documents)",
            category_id,
            subcategories,
            documents
        );
        Ok(Some(true))
    }

    async fn soft_delete_subcategory(
        &self,
        subcategory_id: &str,
        category_id: &str,
        user_id: &str,
    ) -> Result<Option<bool>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            r#"
            UPDATE subcategories SET deleted_at = ?
            WHERE id = ? AND category_id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(subcategory_id)
        .bind(category_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            tx.rollback().await?;
            return Ok(Some(false));
        }

        let documents = sqlx::query(
            r#"
            UPDATE documents SET deleted_at = ?
            WHERE user_id = ? AND subcategory_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(user_id)
        .bind(subcategory_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            "Soft deleted subcategory: {} ({} documents)",
            subcategory_id,
            documents
        );
        Ok(Some(true))
    }
}
