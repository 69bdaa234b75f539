//! Wire Models
//!
//! Records exchanged with the upstream analytics API. All of them are
//! read-only snapshots; the dashboard never mutates or persists them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Open string-keyed map of arbitrary JSON values (`tags`, `metrics`)
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Count per alert type or level
pub type CountMap = BTreeMap<String, u64>;

// ============================================
// EVENTS
// ============================================

/// A single observation emitted by the upstream service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_alert: Option<bool>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub alert_level: Option<String>,
    #[serde(default)]
    pub alert_title: Option<String>,
    #[serde(default)]
    pub alert_message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tags: Option<JsonMap>,
    #[serde(default)]
    pub metrics: Option<JsonMap>,
}

impl AnomalyEvent {
    /// Create an event with only its id set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: None,
            is_alert: None,
            alert_type: None,
            alert_level: None,
            alert_title: None,
            alert_message: None,
            user_id: None,
            tags: None,
            metrics: None,
        }
    }

    /// Whether the event was flagged as an alert
    pub fn is_alert(&self) -> bool {
        self.is_alert.unwrap_or(false)
    }

    /// Whether there is an alert title or message to show
    pub fn has_alert_details(&self) -> bool {
        non_empty(&self.alert_title).is_some() || non_empty(&self.alert_message).is_some()
    }
}

/// Query descriptor for `/events`.
///
/// Every field is optional; an absent field places no constraint on
/// that dimension and is left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEventFilter {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_alert: Option<bool>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub alert_level: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl AnomalyEventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alert(mut self, is_alert: bool) -> Self {
        self.is_alert = Some(is_alert);
        self
    }

    pub fn alert_type(mut self, alert_type: impl Into<String>) -> Self {
        self.alert_type = Some(alert_type.into());
        self
    }

    pub fn alert_level(mut self, alert_level: impl Into<String>) -> Self {
        self.alert_level = Some(alert_level.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn window(mut self, window: &TimeWindow) -> Self {
        self.start_time = window.start_time.clone();
        self.end_time = window.end_time.clone();
        self
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Aggregate counts from `/events/stats/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEventStats {
    pub total_events: u64,
    pub alert_count: u64,
    #[serde(default)]
    pub alert_by_type: CountMap,
    #[serde(default)]
    pub alert_by_level: CountMap,
}

// ============================================
// DASHBOARD
// ============================================

/// Optional start/end bounds, sent as `start_time` / `end_time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl TimeWindow {
    /// No bounds; the backend picks its own default range
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(start_time: Option<String>, end_time: Option<String>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// Query bounds echoed back by the overview endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRangeEcho {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Aggregate snapshot from `/dashboard/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_events: u64,
    pub total_alerts: u64,
    pub alert_rate: f64,
    #[serde(default)]
    pub alerts_by_type: CountMap,
    #[serde(default)]
    pub alerts_by_level: CountMap,
    #[serde(default)]
    pub recent_alerts: Vec<JsonMap>,
    #[serde(default)]
    pub time_range: TimeRangeEcho,
}

/// One bucket of the alert timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTrend {
    /// Bucket start (ISO-8601)
    pub time_range: String,
    pub alert_count: u64,
    pub total_count: u64,
    pub alert_rate: f64,
}

impl AlertTrend {
    /// Alert rate of the bucket in [0, 1].
    ///
    /// Derived from the counts when the bucket is non-empty, otherwise
    /// the reported rate is used.
    pub fn rate(&self) -> f64 {
        if self.total_count > 0 {
            self.alert_count as f64 / self.total_count as f64
        } else {
            self.alert_rate.clamp(0.0, 1.0)
        }
    }
}

/// Response of `/dashboard/timeline`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertTimelineResponse {
    #[serde(default)]
    pub timeline: Vec<AlertTrend>,
    pub total_alerts: u64,
    #[serde(default)]
    pub peak_alert_time: Option<String>,
}

/// Per-service alert rollup from `/dashboard/services`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAlertSummary {
    pub service: String,
    pub total_alerts: u64,
    pub critical_alerts: u64,
    pub warning_alerts: u64,
    #[serde(default)]
    pub last_alert_time: Option<String>,
}

impl ServiceAlertSummary {
    /// Alerts that are neither critical nor warning
    pub fn other_alerts(&self) -> u64 {
        self.total_alerts
            .saturating_sub(self.critical_alerts + self.warning_alerts)
    }
}

/// Timeline bucket width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Hour,
    Day,
    Week,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Hour => "hour",
            GroupBy::Day => "day",
            GroupBy::Week => "week",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(GroupBy::Hour),
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            other => Err(format!("Invalid group_by: {}. Use: hour, day, week", other)),
        }
    }
}

/// Parameters of the timeline endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineQuery {
    pub window: TimeWindow,
    pub group_by: GroupBy,
    pub alert_type: Option<String>,
}

impl TimelineQuery {
    /// Unbounded, hourly buckets, all alert types
    pub fn hourly() -> Self {
        Self::default()
    }

    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn alert_type(mut self, alert_type: impl Into<String>) -> Self {
        self.alert_type = Some(alert_type.into());
        self
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }
}

/// Response of the upstream `/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// `Some(&str)` when the option holds a non-empty string
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_optional_fields_default() {
        let event: AnomalyEvent = serde_json::from_str(r#"{"id": "evt-1"}"#).unwrap();
        assert_eq!(event, AnomalyEvent::new("evt-1"));
        assert!(!event.is_alert());
        assert!(!event.has_alert_details());
    }

    #[test]
    fn test_event_missing_id_rejected() {
        let result: Result<AnomalyEvent, _> = serde_json::from_str(r#"{"is_alert": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_count_rejected() {
        let body = r#"{"service": "api", "total_alerts": -1, "critical_alerts": 0, "warning_alerts": 0}"#;
        let result: Result<ServiceAlertSummary, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_overview_decodes_backend_payload() {
        let body = r#"{
            "total_events": 120,
            "total_alerts": 8,
            "alert_rate": 0.0667,
            "alerts_by_type": {"latency": 5, "error_rate": 3},
            "alerts_by_level": {"CRITICAL": 3, "WARNING": 5},
            "recent_alerts": [{"id": "a", "alert_level": "CRITICAL"}],
            "time_range": {"start": "2024-05-01T00:00:00", "end": null}
        }"#;
        let overview: DashboardOverview = serde_json::from_str(body).unwrap();
        assert_eq!(overview.total_events, 120);
        assert_eq!(overview.alerts_by_level.get("WARNING"), Some(&5));
        assert_eq!(overview.recent_alerts.len(), 1);
        assert_eq!(overview.time_range.start.as_deref(), Some("2024-05-01T00:00:00"));
        assert!(overview.time_range.end.is_none());
    }

    #[test]
    fn test_trend_rate_from_counts() {
        let trend = AlertTrend {
            time_range: "2024-05-01T10:00:00".to_string(),
            alert_count: 2,
            total_count: 10,
            alert_rate: 0.0,
        };
        assert!((trend.rate() - 0.2).abs() < f64::EPSILON);

        let empty = AlertTrend {
            total_count: 0,
            alert_count: 0,
            alert_rate: 0.0,
            ..trend
        };
        assert_eq!(empty.rate(), 0.0);
    }

    #[test]
    fn test_group_by_parse() {
        assert_eq!("HOUR".parse::<GroupBy>().unwrap(), GroupBy::Hour);
        assert_eq!("week".parse::<GroupBy>().unwrap(), GroupBy::Week);
        assert!("month".parse::<GroupBy>().is_err());
        assert_eq!(GroupBy::default(), GroupBy::Hour);
        assert_eq!(serde_json::to_string(&GroupBy::Day).unwrap(), "\"day\"");
    }

    #[test]
    fn test_service_other_alerts() {
        let summary = ServiceAlertSummary {
            service: "checkout".to_string(),
            total_alerts: 10,
            critical_alerts: 3,
            warning_alerts: 4,
            last_alert_time: None,
        };
        assert_eq!(summary.other_alerts(), 3);
    }
}
