//! Shared test fixtures

use crate::database::*;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use tempfile::TempDir;

/// Fresh file-backed database; concurrent tests need a real file, not ":memory:"
pub async fn create_test_repo() -> (Repository, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let pool = create_pool(&temp_dir.path().join("test.db")).await.unwrap();
    (Repository::new(pool), temp_dir)
}

/// Store double that forwards to a real repository unless told to fail.
///
/// Failures are reported as [`AppError::Transport`], like a dropped connection.
pub struct ScriptedStore {
    inner: Option<Repository>,
    failing: HashSet<&'static str>,
    hide_defaults: bool,
}

impl ScriptedStore {
    pub fn wrapping(repo: Repository) -> Self {
        Self {
            inner: Some(repo),
            failing: HashSet::new(),
            hide_defaults: false,
        }
    }

    /// Every call fails
    pub fn offline() -> Self {
        Self {
            inner: None,
            failing: HashSet::new(),
            hide_defaults: false,
        }
    }

    pub fn fail_on(mut self, method: &'static str) -> Self {
        self.failing.insert(method);
        self
    }

    /// Make the existence check report zero default categories
    pub fn hide_defaults(mut self) -> Self {
        self.hide_defaults = true;
        self
    }

    fn repo(&self, method: &'static str) -> Result<&Repository> {
        match &self.inner {
            Some(repo) if !self.failing.contains(method) => Ok(repo),
            _ => Err(AppError::Transport(format!("{}: connection reset", method))),
        }
    }
}

#[async_trait]
impl RemoteStore for ScriptedStore {
    async fn count_default_categories(&self, user_id: &str) -> Result<i64> {
        let repo = self.repo("count_default_categories")?;
        if self.hide_defaults {
            return Ok(0);
        }
        repo.count_default_categories(user_id).await
    }

    async fn insert_categories(&self, rows: &[NewCategory]) -> Result<()> {
        self.repo("insert_categories")?.insert_categories(rows).await
    }

    async fn insert_subcategories(&self, rows: &[NewSubcategory]) -> Result<()> {
        self.repo("insert_subcategories")?
            .insert_subcategories(rows)
            .await
    }

    async fn live_document_category_ids(&self, user_id: &str) -> Result<Vec<String>> {
        self.repo("live_document_category_ids")?
            .live_document_category_ids(user_id)
            .await
    }

    async fn live_document_subcategory_ids(&self, user_id: &str) -> Result<Vec<String>> {
        self.repo("live_document_subcategory_ids")?
            .live_document_subcategory_ids(user_id)
            .await
    }

    async fn list_custom_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repo("list_custom_categories")?
            .list_custom_categories(user_id)
            .await
    }

    async fn list_custom_subcategories(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<Subcategory>> {
        self.repo("list_custom_subcategories")?
            .list_custom_subcategories(user_id, category_id)
            .await
    }

    async fn count_category_documents(&self, user_id: &str, category_id: &str) -> Result<i64> {
        self.repo("count_category_documents")?
            .count_category_documents(user_id, category_id)
            .await
    }

    async fn deleted_default_category_ids(&self, user_id: &str) -> Result<Vec<String>> {
        self.repo("deleted_default_category_ids")?
            .deleted_default_category_ids(user_id)
            .await
    }

    async fn deleted_default_subcategory_ids(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<String>> {
        self.repo("deleted_default_subcategory_ids")?
            .deleted_default_subcategory_ids(user_id, category_id)
            .await
    }

    async fn insert_document(&self, doc: &NewDocument) -> Result<Document> {
        self.repo("insert_document")?.insert_document(doc).await
    }

    async fn soft_delete_category(
        &self,
        category_id: &str,
        user_id: &str,
    ) -> Result<Option<bool>> {
        self.repo("soft_delete_category")?
            .soft_delete_category(category_id, user_id)
            .await
    }

    async fn soft_delete_subcategory(
        &self,
        subcategory_id: &str,
        category_id: &str,
        user_id: &str,
    ) -> Result<Option<bool>> {
        self.repo("soft_delete_subcategory")?
            .soft_delete_subcategory(subcategory_id, category_id, user_id)
            .await
    }
}
