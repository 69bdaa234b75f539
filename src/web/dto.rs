//! Data Transfer Objects
//!
//! Query parameters accepted by the pages and the JSON health payload.

use serde::{Deserialize, Serialize};

use super::error::{WebError, WebResult};
use crate::view::{EventFilters, MAX_PAGE};

// ============================================
// EVENTS PAGE
// ============================================

/// Query string of `GET /events`.
///
/// Fields are kept as raw strings so that the empty value an HTML form
/// submits for "All" means "unset" instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct EventsParams {
    #[serde(default)]
    pub is_alert: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub alert_level: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl EventsParams {
    /// Filters and page index, validating `is_alert` and `page`
    pub fn parse(&self) -> WebResult<(EventFilters, u32)> {
        let is_alert = match trimmed(&self.is_alert) {
            None => None,
            Some(v) if v.eq_ignore_ascii_case("true") => Some(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Some(false),
            Some(other) => {
                return Err(WebError::BadRequest(format!(
                    "is_alert must be true or false, got '{}'",
                    other
                )))
            }
        };

        let page = match trimmed(&self.page) {
            None => 0,
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|page| *page <= MAX_PAGE)
                .ok_or_else(|| {
                    WebError::BadRequest(format!(
                        "page must be an integer between 0 and {}, got '{}'",
                        MAX_PAGE, v
                    ))
                })?,
        };

        let filters = EventFilters {
            is_alert,
            alert_type: trimmed(&self.alert_type).unwrap_or_default().to_string(),
            alert_level: trimmed(&self.alert_level).unwrap_or_default().to_string(),
            user_id: trimmed(&self.user_id).unwrap_or_default().to_string(),
        };

        Ok((filters, page))
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Dashboard data state: ready, loading, error
    pub dashboard: String,
    pub upstream: UpstreamHealth,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

/// Result of probing the upstream `/health`
#[derive(Debug, Serialize, Deserialize)]
pub struct UpstreamHealth {
    pub status: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
