//! Document counts per category and subcategory
//!
//! One projection query per call, tallied in memory, instead of one count
//! query per category.

use crate::database::RemoteStore;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Key -> live document count. Keys with no documents are absent.
pub type DocumentCounts = HashMap<String, i64>;

/// Service computing live document counts
#[derive(Clone)]
pub struct AggregationService {
    store: Arc<dyn RemoteStore>,
}

impl AggregationService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Live document count per category. Empty on failure.
    pub async fn category_document_counts(&self, user_id: &str) -> DocumentCounts {
        self.try_category_document_counts(user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Category counts unavailable for user {}: {}", user_id, e);
                DocumentCounts::new()
            })
    }

    /// Live document count per subcategory. Empty on failure.
    pub async fn subcategory_document_counts(&self, user_id: &str) -> DocumentCounts {
        self.try_subcategory_document_counts(user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Subcategory counts unavailable for user {}: {}", user_id, e);
                DocumentCounts::new()
            })
    }

    pub async fn try_category_document_counts(&self, user_id: &str) -> Result<DocumentCounts> {
        let ids = self
            .store
            .live_document_category_ids(user_id)
            .await
            .map_err(|e| e.during("get_all_category_document_counts"))?;
        Ok(tally(ids))
    }

    pub async fn try_subcategory_document_counts(&self, user_id: &str) -> Result<DocumentCounts> {
        let ids = self
            .store
            .live_document_subcategory_ids(user_id)
            .await
            .map_err(|e| e.during("get_all_subcategory_document_counts"))?;
        Ok(tally(ids))
    }
}

fn tally(ids: Vec<String>) -> DocumentCounts {
    let mut counts = DocumentCounts::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}
