//! Chart Transforms
//!
//! Pure functions turning API records into display-ready series and
//! strings. Nothing here performs I/O.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::models::{AlertTimelineResponse, CountMap, DashboardOverview, JsonMap};

/// Placeholder for absent values
pub const NOT_AVAILABLE: &str = "N/A";

/// Slice colors, cycled by index
pub const PALETTE: [&str; 4] = ["#ef4444", "#f59e0b", "#3b82f6", "#10b981"];

/// One named value of a pie or bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
}

/// One point of the timeline charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Bucket start as `HH:MM`
    pub time: String,
    pub alerts: u64,
    pub total: u64,
    /// Alert rate in percent, one decimal
    pub rate: String,
}

/// Series for a pie/bar chart, one entry per key
pub fn pie_series(counts: &CountMap) -> Vec<PieSlice> {
    counts
        .iter()
        .map(|(name, value)| PieSlice {
            name: name.clone(),
            value: *value,
        })
        .collect()
}

/// Sum of all slice values
pub fn series_total(series: &[PieSlice]) -> u64 {
    series.iter().map(|s| s.value).sum()
}

/// Whole-number share of a slice, as shown on pie labels
pub fn share_percent(value: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round() as u64
}

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Chart points for every timeline bucket, in order
pub fn timeline_points(timeline: &AlertTimelineResponse) -> Vec<TimelinePoint> {
    timeline
        .timeline
        .iter()
        .map(|trend| TimelinePoint {
            time: format_hour_minute(&trend.time_range),
            alerts: trend.alert_count,
            total: trend.total_count,
            rate: format_rate_percent(trend.rate()),
        })
        .collect()
}

/// `0.2` -> `"20.0"`
pub fn format_rate_percent(rate: f64) -> String {
    format!("{:.1}", rate * 100.0)
}

/// `0.0667` -> `"6.67%"`
pub fn format_alert_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Thousands-separated count: `1234567` -> `"1,234,567"`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse an ISO-8601 timestamp, with or without an offset.
///
/// Timestamps with an offset keep their own wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// `HH:MM`, or the raw value when it cannot be parsed
pub fn format_hour_minute(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// `yyyy-MM-dd HH:mm:ss`, or `N/A` when absent
pub fn format_timestamp(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => parse_timestamp(v)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| v.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Peak alert time card value
pub fn format_peak_time(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => format_hour_minute(v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Value or `N/A`
pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Indented JSON for `tags` / `metrics`
pub fn pretty_json(map: &JsonMap) -> String {
    serde_json::to_string_pretty(map).unwrap_or_default()
}

// ============================================
// ALERT LEVELS
// ============================================

/// Severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl AlertLevel {
    /// Case-insensitive parse; unknown levels yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "CRITICAL" => Some(AlertLevel::Critical),
            "WARNING" => Some(AlertLevel::Warning),
            "INFO" => Some(AlertLevel::Info),
            _ => None,
        }
    }
}

/// Display color of an alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelColor {
    Red,
    Yellow,
    Blue,
    Gray,
}

impl LevelColor {
    pub fn name(&self) -> &'static str {
        match self {
            LevelColor::Red => "red",
            LevelColor::Yellow => "yellow",
            LevelColor::Blue => "blue",
            LevelColor::Gray => "gray",
        }
    }

    /// Badge CSS class
    pub fn badge_class(&self) -> &'static str {
        match self {
            LevelColor::Red => "badge badge-red",
            LevelColor::Yellow => "badge badge-yellow",
            LevelColor::Blue => "badge badge-blue",
            LevelColor::Gray => "badge badge-gray",
        }
    }
}

/// Color for an alert level string; gray for anything unrecognised
pub fn level_color(level: Option<&str>) -> LevelColor {
    match level.and_then(AlertLevel::parse) {
        Some(AlertLevel::Critical) => LevelColor::Red,
        Some(AlertLevel::Warning) => LevelColor::Yellow,
        Some(AlertLevel::Info) => LevelColor::Blue,
        None => LevelColor::Gray,
    }
}

// ============================================
// STAT CARDS
// ============================================

/// Headline number on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub accent: &'static str,
}

/// The four dashboard stat cards
pub fn stat_cards(overview: &DashboardOverview, timeline: &AlertTimelineResponse) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Events",
            value: format_count(overview.total_events),
            accent: "blue",
        },
        StatCard {
            title: "Total Alerts",
            value: format_count(overview.total_alerts),
            accent: "red",
        },
        StatCard {
            title: "Alert Rate",
            value: format_alert_rate(overview.alert_rate),
            accent: "orange",
        },
        StatCard {
            title: "Peak Alert Time",
            value: format_peak_time(timeline.peak_alert_time.as_deref()),
            accent: "green",
        },
    ]
}
