//! Screen hydration
//!
//! Builds the category and subcategory overviews from concurrent queries.
//! Template entries come from the catalog, minus any the user has deleted;
//! custom entries are listed from the store. A screen is either fully
//! loaded or an error.

use super::aggregation::{AggregationService, DocumentCounts};
use crate::catalog;
use crate::database::RemoteStore;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// One row of the category overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub background_color: String,
    pub is_custom: bool,
    pub document_count: i64,
}

/// One row of a category's subcategory list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: Option<String>,
    pub is_custom: bool,
    pub document_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriesScreen {
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoriesScreen {
    pub category_id: String,
    /// Live documents filed directly under the category
    pub total_documents: i64,
    pub subcategories: Vec<SubcategoryView>,
}

/// Service composing counts and listings for display
#[derive(Clone)]
pub struct LoaderService {
    store: Arc<dyn RemoteStore>,
    aggregation: AggregationService,
}

impl LoaderService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            aggregation: AggregationService::new(store.clone()),
            store,
        }
    }

    pub async fn load_categories_optimized(&self, user_id: &str) -> Result<CategoriesScreen> {
        let (counts, custom, deleted) = tokio::try_join!(
            self.aggregation.try_category_document_counts(user_id),
            self.store.list_custom_categories(user_id),
            self.store.deleted_default_category_ids(user_id),
        )
        .map_err(|e| e.during("load_categories_optimized"))?;

        let deleted: HashSet<String> = deleted.into_iter().collect();
        let templates = catalog::categories()
            .iter()
            .filter(|t| !deleted.contains(t.id))
            .map(|t| CategoryView {
                id: t.id.to_string(),
                name: t.name.to_string(),
                icon: t.icon.to_string(),
                background_color: t.color.to_string(),
                is_custom: false,
                document_count: count_of(&counts, t.id),
            });

        let customs = custom.into_iter().map(|c| CategoryView {
            document_count: count_of(&counts, &c.id),
            id: c.id,
            name: c.name,
            icon: c.icon,
            background_color: c.background_color,
            is_custom: true,
        });

        let categories: Vec<CategoryView> = templates.chain(customs).collect();

        tracing::debug!(
            "Loaded {} categories for user: {}",
            categories.len(),
            user_id
        );

        Ok(CategoriesScreen { categories })
    }

    pub async fn load_subcategories_optimized(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<SubcategoriesScreen> {
        let (counts, custom, total_documents, deleted) = tokio::try_join!(
            self.aggregation.try_subcategory_document_counts(user_id),
            self.store.list_custom_subcategories(user_id, category_id),
            self.store.count_category_documents(user_id, category_id),
            self.store.deleted_default_subcategory_ids(user_id, category_id),
        )
        .map_err(|e| e.during("load_subcategories_optimized"))?;

        let deleted: HashSet<String> = deleted.into_iter().collect();
        let template = catalog::find_category(category_id);
        let parent_color = template.map(|t| t.color.to_string());

        let templates = template
            .into_iter()
            .flat_map(|t| t.subcategories.iter())
            .filter(|s| !deleted.contains(s.id))
            .map(|s| SubcategoryView {
                id: s.id.to_string(),
                name: s.name.to_string(),
                icon: s.icon.to_string(),
                color: Some(s.color.to_string()),
                is_custom: false,
                document_count: count_of(&counts, s.id),
            });

        let customs = custom.into_iter().map(|s| SubcategoryView {
            document_count: count_of(&counts, &s.id),
            id: s.id,
            name: s.name,
            icon: s.icon,
            color: parent_color.clone(),
            is_custom: true,
        });

        let subcategories: Vec<SubcategoryView> = templates.chain(customs).collect();

        Ok(SubcategoriesScreen {
            category_id: category_id.to_string(),
            total_documents,
            subcategories,
        })
    }
}

fn count_of(counts: &DocumentCounts, id: &str) -> i64 {
    counts.get(id).copied().unwrap_or(0)
}
