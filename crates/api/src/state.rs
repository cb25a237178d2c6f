use std::sync::Arc;

use foodshare_core::cache::ViewCache;
use foodshare_db::models::food_listing::ListingWithProvider;

use crate::config::ServerConfig;

/// Snapshot of the available-listings view.
pub type ListingCache = ViewCache<Vec<ListingWithProvider>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: foodshare_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Available listings as last loaded. Handlers that change listings
    /// must call `invalidate()` after a successful write.
    pub listing_cache: Arc<ListingCache>,
}

impl AppState {
    pub fn new(pool: foodshare_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            listing_cache: Arc::new(ListingCache::new()),
        }
    }
}
