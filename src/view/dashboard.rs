//! Dashboard View Model
//!
//! Loads the overview, the hourly timeline and the service summary as
//! one all-or-nothing cycle, re-runs it on a fixed timer and publishes
//! every state change through a `watch` channel.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::charts::{pie_series, stat_cards, timeline_points, PieSlice, StatCard, TimelinePoint};
use super::state::{FetchGuard, LoadState};
use crate::client::{AnomalyApi, ClientResult};
use crate::models::{
    AlertTimelineResponse, DashboardOverview, ServiceAlertSummary, TimeWindow, TimelineQuery,
};

/// Period of the automatic refresh
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Everything one successful cycle produced
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub overview: DashboardOverview,
    pub timeline: AlertTimelineResponse,
    pub services: Vec<ServiceAlertSummary>,
}

impl DashboardData {
    pub fn stat_cards(&self) -> Vec<StatCard> {
        stat_cards(&self.overview, &self.timeline)
    }

    pub fn alerts_by_level(&self) -> Vec<PieSlice> {
        pie_series(&self.overview.alerts_by_level)
    }

    pub fn alerts_by_type(&self) -> Vec<PieSlice> {
        pie_series(&self.overview.alerts_by_type)
    }

    pub fn timeline_points(&self) -> Vec<TimelinePoint> {
        timeline_points(&self.timeline)
    }
}

/// State published to renderers
pub type DashboardState = LoadState<DashboardData>;

/// Dashboard page state machine
pub struct DashboardViewModel {
    api: Arc<dyn AnomalyApi>,
    guard: FetchGuard,
    state: watch::Sender<DashboardState>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardViewModel {
    /// Create the view model without starting the timer
    pub fn new(api: Arc<dyn AnomalyApi>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            api,
            guard: FetchGuard::new(),
            state,
            timer: Mutex::new(None),
        }
    }

    /// Create the view model and start loading.
    ///
    /// The first cycle runs immediately, then every [`REFRESH_INTERVAL`]
    /// until [`unmount`](Self::unmount) is called.
    pub fn mount(api: Arc<dyn AnomalyApi>) -> Arc<Self> {
        let vm = Arc::new(Self::new(api));
        vm.start_timer(REFRESH_INTERVAL);
        vm
    }

    fn start_timer(self: &Arc<Self>, period: Duration) {
        let weak: Weak<Self> = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(vm) = weak.upgrade() else {
                    break;
                };
                if vm.guard.is_disposed() {
                    break;
                }
                vm.refresh().await;
            }
        });

        tracing::debug!(period_secs = period.as_secs(), "Dashboard refresh timer started");

        if let Ok(mut timer) = self.timer.lock() {
            *timer = Some(handle);
        }
    }

    /// Stop the timer and ignore any response still in flight.
    ///
    /// Safe to call more than once; only the first call has an effect.
    pub fn unmount(&self) {
        if !self.guard.dispose() {
            return;
        }
        let handle = self.timer.lock().ok().and_then(|mut timer| timer.take());
        if let Some(handle) = handle {
            handle.abort();
            tracing::debug!("Dashboard refresh timer stopped");
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.guard.is_disposed()
    }

    /// Current state
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Run one load cycle (manual refresh and retry use this too)
    pub async fn refresh(&self) {
        let Some(ticket) = self.guard.issue() else {
            return;
        };

        self.state.send_modify(|state| *state = state.begin_loading());

        let result = self.fetch_all().await;

        if !self.guard.is_current(ticket) {
            tracing::debug!("Discarding stale dashboard response");
            return;
        }

        match result {
            Ok(data) => {
                tracing::info!(
                    total_events = data.overview.total_events,
                    total_alerts = data.overview.total_alerts,
                    services = data.services.len(),
                    "Dashboard refreshed"
                );
                self.state.send_replace(LoadState::Ready(data));
            }
            Err(e) => {
                tracing::error!(error = %e, "Dashboard refresh failed");
                self.state.send_replace(LoadState::Error(e.to_string()));
            }
        }
    }

    async fn fetch_all(&self) -> ClientResult<DashboardData> {
        let window = TimeWindow::unbounded();
        let timeline_query = TimelineQuery::hourly();

        let (overview, timeline, services) = tokio::try_join!(
            self.api.dashboard_overview(&window),
            self.api.timeline(&timeline_query),
            self.api.services(&window),
        )?;

        Ok(DashboardData {
            overview,
            timeline,
            services,
        })
    }
}

impl Drop for DashboardViewModel {
    fn drop(&mut self) {
        self.unmount();
    }
}
