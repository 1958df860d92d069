//! Default category seeding
//!
//! Copies the template catalog into a user's rows on first use. Safe to call
//! on every sign-in and from several places at once: concurrent first runs
//! are settled by the primary key, not by a lock.

use crate::catalog;
use crate::database::RemoteStore;
use crate::error::Result;
use std::sync::Arc;

/// What a sync call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Defaults were already present; nothing was written
    AlreadySeeded,
    /// This call inserted the template categories
    Seeded,
    /// Another caller inserted the categories first
    LostRace,
}

/// Service for seeding template categories
#[derive(Clone)]
pub struct CategorySyncService {
    store: Arc<dyn RemoteStore>,
}

impl CategorySyncService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Seed the template categories and subcategories for `user_id` if missing.
    pub async fn sync_default_categories(&self, user_id: &str) -> Result<SyncOutcome> {
        const OP: &str = "sync_default_categories";

        let existing = self
            .store
            .count_default_categories(user_id)
            .await
            .map_err(|e| e.during(OP))?;

        if existing > 0 {
            tracing::debug!("Default categories already present for user: {}", user_id);
            return Ok(SyncOutcome::AlreadySeeded);
        }

        tracing::info!("Seeding default categories for user: {}", user_id);

        let outcome = match self
            .store
            .insert_categories(&catalog::category_rows(user_id))
            .await
        {
            Ok(()) => SyncOutcome::Seeded,
            Err(e) if e.is_duplicate_key() => {
                tracing::debug!("Default categories seeded concurrently for user: {}", user_id);
                SyncOutcome::LostRace
            }
            Err(e) => return Err(e.during(OP)),
        };

        // Attempted even after losing the race: the winner may not have got this far
        match self
            .store
            .insert_subcategories(&catalog::subcategory_rows(user_id))
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Seeded {} default subcategories for user: {}",
                    catalog::subcategory_count(),
                    user_id
                );
            }
            Err(e) if e.is_duplicate_key() => {
                tracing::debug!("Default subcategories already present for user: {}", user_id);
            }
            Err(e) => {
                tracing::warn!(
                    "Seeding default subcategories failed for user {}: {}",
                    user_id,
                    e
                );
            }
        }

        Ok(outcome)
    }
}
