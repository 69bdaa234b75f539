//! Scripted in-memory backend for view-model tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use super::{AnomalyApi, ClientError, ClientResult};
use crate::models::{
    AlertTimelineResponse, AlertTrend, AnomalyEvent, AnomalyEventFilter, AnomalyEventStats,
    DashboardOverview, HealthStatus, ServiceAlertSummary, TimeWindow, TimelineQuery,
};

/// A recorded API call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListEvents(AnomalyEventFilter),
    GetEvent(String),
    EventStats,
    Overview,
    Timeline(TimelineQuery),
    Services,
    Health,
}

impl Call {
    fn name(&self) -> &'static str {
        match self {
            Call::ListEvents(_) => "list_events",
            Call::GetEvent(_) => "get_event",
            Call::EventStats => "event_stats",
            Call::Overview => "overview",
            Call::Timeline(_) => "timeline",
            Call::Services => "services",
            Call::Health => "health",
        }
    }
}

pub(crate) struct MockApi {
    pub overview: Mutex<DashboardOverview>,
    pub timeline: Mutex<AlertTimelineResponse>,
    pub services: Mutex<Vec<ServiceAlertSummary>>,
    pub events: Mutex<Vec<AnomalyEvent>>,
    pub overview_delay: Mutex<Option<Duration>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            overview: Mutex::new(sample_overview()),
            timeline: Mutex::new(sample_timeline()),
            services: Mutex::new(sample_services()),
            events: Mutex::new(sample_events(120)),
            overview_delay: Mutex::new(None),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(events: Vec<AnomalyEvent>) -> Self {
        let api = Self::new();
        *api.events.lock().unwrap() = events;
        api
    }

    /// Make an endpoint ("overview", "timeline", ...) fail until `recover`
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name() == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Filters passed to `list_events`, in call order
    pub fn list_filters(&self) -> Vec<AnomalyEventFilter> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::ListEvents(f) => Some(f.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> ClientResult<()> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(name) {
            return Err(ClientError::Network(format!("{} unavailable", name)));
        }
        Ok(())
    }
}

#[async_trait]
impl AnomalyApi for MockApi {
    async fn list_events(&self, filter: &AnomalyEventFilter) -> ClientResult<Vec<AnomalyEvent>> {
        self.record(Call::ListEvents(filter.clone()))?;
        let events = self.events.lock().unwrap();
        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.unwrap_or(100) as usize;
        Ok(events.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get_event(&self, id: &str) -> ClientResult<AnomalyEvent> {
        self.record(Call::GetEvent(id.to_string()))?;
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ClientError::Http {
                status: 404,
                message: "Event not found".to_string(),
            })
    }

    async fn event_stats(&self, _window: &TimeWindow) -> ClientResult<AnomalyEventStats> {
        self.record(Call::EventStats)?;
        let overview = self.overview.lock().unwrap().clone();
        Ok(AnomalyEventStats {
            total_events: overview.total_events,
            alert_count: overview.total_alerts,
            alert_by_type: overview.alerts_by_type,
            alert_by_level: overview.alerts_by_level,
        })
    }

    async fn dashboard_overview(&self, _window: &TimeWindow) -> ClientResult<DashboardOverview> {
        self.record(Call::Overview)?;
        let snapshot = self.overview.lock().unwrap().clone();
        let delay = *self.overview_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn timeline(&self, query: &TimelineQuery) -> ClientResult<AlertTimelineResponse> {
        self.record(Call::Timeline(query.clone()))?;
        Ok(self.timeline.lock().unwrap().clone())
    }

    async fn services(&self, _window: &TimeWindow) -> ClientResult<Vec<ServiceAlertSummary>> {
        self.record(Call::Services)?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn health_check(&self) -> ClientResult<HealthStatus> {
        self.record(Call::Health)?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            service: "Monitoring API".to_string(),
            version: "1.0.0".to_string(),
        })
    }
}

pub(crate) fn sample_overview() -> DashboardOverview {
    DashboardOverview {
        total_events: 120,
        total_alerts: 8,
        alert_rate: 8.0 / 120.0,
        alerts_by_type: BTreeMap::from([("error_rate".to_string(), 3), ("latency".to_string(), 5)]),
        alerts_by_level: BTreeMap::from([("CRITICAL".to_string(), 3), ("WARNING".to_string(), 5)]),
        ..Default::default()
    }
}

pub(crate) fn sample_timeline() -> AlertTimelineResponse {
    AlertTimelineResponse {
        timeline: vec![
            AlertTrend {
                time_range: "2024-05-01T09:00:00".to_string(),
                alert_count: 2,
                total_count: 10,
                alert_rate: 0.2,
            },
            AlertTrend {
                time_range: "2024-05-01T10:00:00".to_string(),
                alert_count: 6,
                total_count: 110,
                alert_rate: 6.0 / 110.0,
            },
        ],
        total_alerts: 8,
        peak_alert_time: Some("2024-05-01T10:00:00".to_string()),
    }
}

pub(crate) fn sample_services() -> Vec<ServiceAlertSummary> {
    vec![ServiceAlertSummary {
        service: "checkout".to_string(),
        total_alerts: 8,
        critical_alerts: 3,
        warning_alerts: 5,
        last_alert_time: Some("2024-05-01T10:42:17".to_string()),
    }]
}

pub(crate) fn sample_events(count: usize) -> Vec<AnomalyEvent> {
    (0..count)
        .map(|i| {
            let mut event = AnomalyEvent::new(format!("evt-{}", i));
            event.timestamp = Some(format!("2024-05-01T10:{:02}:00", i % 60));
            event.is_alert = Some(i % 15 == 0);
            event
        })
        .collect()
}
