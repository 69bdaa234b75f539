//! Application State
//!
//! Shared state accessible by all page handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::client::AnomalyApi;
use crate::config::Config;
use crate::view::DashboardViewModel;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream API, used by the per-request view models
    pub api: Arc<dyn AnomalyApi>,
    /// The one dashboard view model, refreshed by its own timer
    pub dashboard: Arc<DashboardViewModel>,
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(api: Arc<dyn AnomalyApi>, dashboard: Arc<DashboardViewModel>, config: Config) -> Self {
        Self {
            api,
            dashboard,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
