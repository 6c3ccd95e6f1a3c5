//! Application state for the axum router.
//!
//! The pool is constructed once in the entry point and injected here; no
//! global database singleton exists anywhere in the crate.

use std::sync::Arc;

use crate::api::middleware::{Authorizer, hybrid_authorizer};
use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::storage::ImageStore;

/// Shared state behind every handler.
///
/// Cloning is cheap: services wrap `Arc`-backed pools and the rest is
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Hybrid session/Basic gate for mutating endpoints.
    pub authorizer: Arc<dyn Authorizer>,
    /// Direct pool access for the health probe.
    pub db_pool: AsyncDbPool,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: AsyncDbPool, settings: Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        let store = ImageStore::new(&settings.storage);
        let services = Services::new(repos, store, &settings);
        let authorizer = hybrid_authorizer(services.auth.clone());
        Self {
            services,
            authorizer,
            db_pool: pool,
            settings: Arc::new(settings),
        }
    }
}
