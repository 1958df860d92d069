//! Store seam used by the taxonomy engines
//!
//! Every engine talks to persistence through [`RemoteStore`] so the SQLite
//! repository can be swapped for a hosted backend, or a failing double in tests.
//! Implementations must exclude soft-deleted rows from every `list_*`,
//! `count_*` and `live_*` method.

use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Count non-custom categories owned by the user, soft-deleted rows included.
    async fn count_default_categories(&self, user_id: &str) -> Result<i64>;

    /// Insert all rows in one statement. Fails as a whole on any conflict.
    async fn insert_categories(&self, rows: &[NewCategory]) -> Result<()>;

    /// Insert all rows in one statement. Fails as a whole on any conflict.
    async fn insert_subcategories(&self, rows: &[NewSubcategory]) -> Result<()>;

    /// Category id of every live document of the user that has one.
    async fn live_document_category_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Subcategory id of every live document of the user that has one.
    async fn live_document_subcategory_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Live custom categories, oldest first.
    async fn list_custom_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Live custom subcategories of one category, oldest first.
    async fn list_custom_subcategories(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<Subcategory>>;

    /// Number of live documents filed directly under the category.
    async fn count_category_documents(&self, user_id: &str, category_id: &str) -> Result<i64>;

    /// Ids of the user's soft-deleted template categories.
    async fn deleted_default_category_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Ids of the user's soft-deleted template subcategories under one category.
    async fn deleted_default_subcategory_ids(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<String>>;

    async fn insert_document(&self, doc: &NewDocument) -> Result<Document>;

    /// Atomically soft-delete the category, its subcategories and their documents.
    ///
    /// `Some(false)` or `None` means the category is missing, already deleted,
    /// or owned by someone else.
    async fn soft_delete_category(&self, category_id: &str, user_id: &str)
        -> Result<Option<bool>>;

    /// Atomically soft-delete the subcategory and its documents.
    async fn soft_delete_subcategory(
        &self,
        subcategory_id: &str,
        category_id: &str,
        user_id: &str,
    ) -> Result<Option<bool>>;
}
