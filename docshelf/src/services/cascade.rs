//! Cascading soft-delete
//!
//! Each delete is one store call; the store applies the whole cascade or
//! nothing. This service never walks the hierarchy itself.

use crate::database::RemoteStore;
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Service for deleting taxonomy branches
#[derive(Clone)]
pub struct CascadeDeleteService {
    store: Arc<dyn RemoteStore>,
}

impl CascadeDeleteService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Soft-delete a category with all its subcategories and documents
    pub async fn delete_category_with_cascade(&self, category_id: &str, user_id: &str) -> Result<()> {
        const OP: &str = "delete_category_with_cascade";

        tracing::info!("Deleting category {} for user {}", category_id, user_id);

        let deleted = self
            .store
            .soft_delete_category(category_id, user_id)
            .await
            .map_err(|e| e.during(OP))?;

        if deleted != Some(true) {
            return Err(AppError::NotFoundOrForbidden {
                operation: OP,
                id: category_id.to_string(),
            });
        }

        tracing::info!("Category deleted: {}", category_id);
        Ok(())
    }

    /// Soft-delete a subcategory and its documents
    pub async fn delete_subcategory_with_cascade(
        &self,
        subcategory_id: &str,
        category_id: &str,
        user_id: &str,
    ) -> Result<()> {
        const OP: &str = "delete_subcategory_with_cascade";

        tracing::info!(
            "Deleting subcategory {} of category {} for user {}",
            subcategory_id,
            category_id,
            user_id
        );

        let deleted = self
            .store
            .soft_delete_subcategory(subcategory_id, category_id, user_id)
            .await
            .map_err(|e| e.during(OP))?;

        if deleted != Some(true) {
            return Err(AppError::NotFoundOrForbidden {
                operation: OP,
                id: subcategory_id.to_string(),
            });
        }

        tracing::info!("Subcategory deleted: {}", subcategory_id);
        Ok(())
    }
}
