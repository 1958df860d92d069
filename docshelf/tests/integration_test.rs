//! Integration tests for DocShelf
//!
//! These tests drive the public services end to end:
//! - Concurrent first-run seeding
//! - Upload, count and cascade delete
//! - Ownership checks and upload rollback

use docshelf::app::AppState;
use docshelf::catalog;
use docshelf::database::DocumentFilter;
use docshelf::error::AppError;
use docshelf::services::{Placement, StaticAuthProvider, SyncOutcome, UploadFile};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to open a fresh data directory signed in as `user_id`
async fn create_test_state(user_id: &str) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let auth = Arc::new(StaticAuthProvider::new(Some(user_id.to_string())));
    let state = AppState::initialize(temp_dir.path().to_path_buf(), auth)
        .await
        .unwrap();

    (state, temp_dir)
}

async fn default_row_counts(state: &AppState, user_id: &str) -> (i64, i64) {
    let categories: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE user_id = ? AND is_custom = 0")
            .bind(user_id)
            .fetch_one(state.repo.pool())
            .await
            .unwrap();
    let subcategories: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM subcategories WHERE user_id = ? AND is_custom = 0",
    )
    .bind(user_id)
    .fetch_one(state.repo.pool())
    .await
    .unwrap();
    (categories, subcategories)
}

fn text_file(name: &str) -> UploadFile {
    UploadFile {
        file_name: name.to_string(),
        mime_type: Some("text/plain".to_string()),
        data: b"hello".to_vec(),
    }
}

#[tokio::test]
async fn test_concurrent_first_sync_is_idempotent() {
    let (state, _temp) = create_test_state("fresh-user").await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let sync = state.sync.clone();
            tokio::spawn(async move { sync.sync_default_categories("fresh-user").await })
        })
        .collect();

    let mut seeded = 0;
    for task in tasks {
        if task.await.unwrap().unwrap() == SyncOutcome::Seeded {
            seeded += 1;
        }
    }

    assert_eq!(seeded, 1, "exactly one caller should insert the defaults");
    assert_eq!(
        default_row_counts(&state, "fresh-user").await,
        (
            catalog::categories().len() as i64,
            catalog::subcategory_count() as i64
        )
    );
}

#[tokio::test]
async fn test_two_concurrent_syncs_yield_5_and_28() {
    let (state, _temp) = create_test_state("user-a").await;

    let (a, b) = tokio::join!(
        state.sync.sync_default_categories("user-a"),
        state.sync.sync_default_categories("user-a"),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(default_row_counts(&state, "user-a").await, (5, 28));
}

#[tokio::test]
async fn test_upload_count_then_cascade_delete() {
    let (state, _temp) = create_test_state("user-1").await;
    let user_id = state.sign_in().await.unwrap().unwrap();

    let document = state
        .uploads
        .upload_document(
            text_file("id-scan.txt"),
            &user_id,
            Placement {
                category_id: Some("personal".to_string()),
                subcategory_id: Some("personal-passport".to_string()),
                folder_id: None,
            },
        )
        .await
        .unwrap();

    let counts = state.aggregation.category_document_counts(&user_id).await;
    assert_eq!(counts, HashMap::from([("personal".to_string(), 1)]));

    state
        .cascade
        .delete_category_with_cascade("personal", &user_id)
        .await
        .unwrap();

    assert!(state
        .aggregation
        .category_document_counts(&user_id)
        .await
        .is_empty());
    assert!(state
        .repo
        .list_subcategories(&user_id, "personal")
        .await
        .unwrap()
        .is_empty());
    let filter = DocumentFilter {
        category_id: Some("personal".to_string()),
        subcategory_id: None,
    };
    assert!(state
        .repo
        .list_live_documents(&user_id, &filter)
        .await
        .unwrap()
        .is_empty());

    // Soft-deleted, not removed
    let stored = state.repo.get_document(&document.id).await.unwrap().unwrap();
    assert!(stored.deleted_at.is_some());
    assert!(state.blob_store.exists(&stored.storage_path).await.unwrap());

    // Other categories are untouched
    assert_eq!(
        state
            .repo
            .list_subcategories(&user_id, "finance")
            .await
            .unwrap()
            .len(),
        6
    );
}

#[tokio::test]
async fn test_cascade_delete_rejects_other_users_category() {
    let (state, _temp) = create_test_state("owner").await;
    state.sign_in().await.unwrap();

    let category = state
        .repo
        .create_custom_category("owner", "Medical", "heart", "#EF4444")
        .await
        .unwrap();

    let err = state
        .cascade
        .delete_category_with_cascade(&category.id, "intruder")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrForbidden { .. }));

    // Template ids exist for every user, but ownership still applies
    let err = state
        .cascade
        .delete_category_with_cascade("finance", "intruder")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrForbidden { .. }));

    let stored = state
        .repo
        .get_category("owner", &category.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, category);
    assert!(state
        .repo
        .get_category("owner", "finance")
        .await
        .unwrap()
        .unwrap()
        .deleted_at
        .is_none());
}

#[tokio::test]
async fn test_upload_rollback_leaves_no_trace() {
    let (state, _temp) = create_test_state("user-1").await;
    let user_id = state.sign_in().await.unwrap().unwrap();

    let result = state
        .uploads
        .upload_document(
            text_file("lost.txt"),
            &user_id,
            Placement {
                category_id: Some("deleted-elsewhere".to_string()),
                ..Placement::default()
            },
        )
        .await;
    assert!(result.is_err());

    let user_dir = state.blob_store.root().join(&user_id);
    let leftovers = match std::fs::read_dir(&user_dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    };
    assert_eq!(leftovers, 0);

    let documents = state
        .repo
        .list_live_documents(&user_id, &DocumentFilter::default())
        .await
        .unwrap();
    assert!(documents.is_empty());
}

#[tokio::test]
async fn test_loader_reflects_uploads() {
    let (state, _temp) = create_test_state("user-1").await;
    let user_id = state.sign_in().await.unwrap().unwrap();

    for name in ["a.txt", "b.txt"] {
        state
            .uploads
            .upload_document(
                text_file(name),
                &user_id,
                Placement {
                    category_id: Some("health".to_string()),
                    subcategory_id: Some("health-lab-results".to_string()),
                    folder_id: Some("folder-1".to_string()),
                },
            )
            .await
            .unwrap();
    }

    let categories = state
        .loader
        .load_categories_optimized(&user_id)
        .await
        .unwrap();
    let health = categories
        .categories
        .iter()
        .find(|c| c.id == "health")
        .unwrap();
    assert_eq!(health.document_count, 2);

    let subcategories = state
        .loader
        .load_subcategories_optimized(&user_id, "health")
        .await
        .unwrap();
    assert_eq!(subcategories.total_documents, 2);
    let lab = subcategories
        .subcategories
        .iter()
        .find(|s| s.id == "health-lab-results")
        .unwrap();
    assert_eq!(lab.document_count, 2);
}

#[tokio::test]
async fn test_sign_in_without_user() {
    let temp_dir = TempDir::new().unwrap();
    let state = AppState::initialize(
        temp_dir.path().to_path_buf(),
        Arc::new(StaticAuthProvider::new(None)),
    )
    .await
    .unwrap();

    assert_eq!(state.sign_in().await.unwrap(), None);
}
