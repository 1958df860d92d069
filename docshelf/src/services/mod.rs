//! Services module
//!
//! Taxonomy engines that coordinate between callers and the store seams.

pub mod aggregation;
pub mod cascade;
pub mod identity;
pub mod loader;
pub mod sync;
pub mod upload;

pub use aggregation::{AggregationService, DocumentCounts};
pub use cascade::CascadeDeleteService;
pub use identity::{AuthProvider, AuthUser, Clock, IdentityCache, StaticAuthProvider, SystemClock};
pub use loader::{CategoriesScreen, CategoryView, LoaderService, SubcategoriesScreen, SubcategoryView};
pub use sync::{CategorySyncService, SyncOutcome};
pub use upload::{DocumentUploadService, Placement, UploadFile};
