//! Application state and initialization
//!
//! Opens the data directory and wires every service to the same
//! repository and blob store.

use crate::config;
use crate::database::{create_pool, RemoteStore, Repository};
use crate::error::Result;
use crate::services::*;
use crate::storage::{BlobStorage, BlobStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub repo: Repository,
    pub blob_store: BlobStore,
    pub identity: Arc<IdentityCache>,
    pub sync: CategorySyncService,
    pub aggregation: AggregationService,
    pub loader: LoaderService,
    pub cascade: CascadeDeleteService,
    pub uploads: DocumentUploadService,
}

impl AppState {
    /// Open (or create) the database and blob store under `data_dir`
    pub async fn initialize(data_dir: PathBuf, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        tracing::info!("Initializing application at: {:?}", data_dir);

        std::fs::create_dir_all(&data_dir)?;

        let pool = create_pool(&data_dir.join(config::DATABASE_FILE_NAME)).await?;
        let repo = Repository::new(pool);

        let blob_store = BlobStore::new(data_dir.join(config::BLOB_DIR_NAME));
        blob_store.initialize().await?;

        let store: Arc<dyn RemoteStore> = Arc::new(repo.clone());
        let blobs: Arc<dyn BlobStorage> = Arc::new(blob_store.clone());

        let state = Self {
            data_dir,
            identity: Arc::new(IdentityCache::new(auth)),
            sync: CategorySyncService::new(store.clone()),
            aggregation: AggregationService::new(store.clone()),
            loader: LoaderService::new(store.clone()),
            cascade: CascadeDeleteService::new(store.clone()),
            uploads: DocumentUploadService::new(store, blobs),
            repo,
            blob_store,
        };

        tracing::info!("Application initialized successfully");

        Ok(state)
    }

    /// Resolve the signed-in user and make sure their default categories exist.
    ///
    /// Returns `None` when nobody is signed in.
    pub async fn sign_in(&self) -> Result<Option<String>> {
        let Some(user_id) = self.identity.get_cached_user_id().await? else {
            tracing::info!("No signed-in user");
            return Ok(None);
        };

        let outcome = self.sync.sync_default_categories(&user_id).await?;
        tracing::info!("User {} signed in ({:?})", user_id, outcome);

        Ok(Some(user_id))
    }
}
