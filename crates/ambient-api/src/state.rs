//! Shared application state for the directory API.
//!
//! [`AppState`] owns the [`SpaceDirectory`] behind a single read-write
//! lock. Handlers take the read lock for listings and the write lock for
//! the whole lookup-check-mutate sequence of an add or delete, which
//! gives serial semantics even though requests run concurrently.

use std::sync::Arc;

use ambient_core::SpaceDirectory;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The directory, shared by all handlers.
    pub directory: Arc<RwLock<SpaceDirectory>>,
    /// When this state was created (i.e. when the seed was loaded).
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create application state around an already-loaded directory.
    pub fn new(directory: SpaceDirectory) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            started_at: Utc::now(),
        }
    }

    /// Whole seconds elapsed since [`Self::started_at`].
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        u64::try_from(elapsed.num_seconds()).unwrap_or(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SpaceDirectory::default())
    }
}
