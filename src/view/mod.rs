//! View Models
//!
//! Per-page state machines over [`AnomalyApi`](crate::client::AnomalyApi)
//! plus the pure transforms that turn API records into chart series.

pub mod charts;
mod dashboard;
mod detail;
mod events;
mod state;

pub use dashboard::{DashboardData, DashboardState, DashboardViewModel, REFRESH_INTERVAL};
pub use detail::{DetailState, EventDetailViewModel};
pub use events::{EventFilters, EventsViewModel, MAX_PAGE, PAGE_SIZE};
pub use state::{FetchGuard, LoadState, Ticket};
