//! Query String Building
//!
//! Typed query objects are flattened into `(key, value)` pairs. Unset
//! fields never produce a pair: the backend must not see `user_id=` or
//! `is_alert=` for a dimension the caller left open.

use crate::models::{AnomalyEventFilter, TimeWindow, TimelineQuery};

use super::error::{ClientError, ClientResult};

/// Upper bound the backend accepts for `limit`
pub const MAX_LIMIT: u32 = 1000;

/// Ordered query parameters
pub type QueryPairs = Vec<(&'static str, String)>;

/// Something that can be sent as URL query parameters
pub trait ToQuery {
    fn query_pairs(&self) -> QueryPairs;
}

fn push_str(pairs: &mut QueryPairs, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

impl ToQuery for TimeWindow {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push_str(&mut pairs, "start_time", &self.start_time);
        push_str(&mut pairs, "end_time", &self.end_time);
        pairs
    }
}

impl ToQuery for AnomalyEventFilter {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push_str(&mut pairs, "start_time", &self.start_time);
        push_str(&mut pairs, "end_time", &self.end_time);
        if let Some(is_alert) = self.is_alert {
            pairs.push(("is_alert", is_alert.to_string()));
        }
        push_str(&mut pairs, "alert_type", &self.alert_type);
        push_str(&mut pairs, "alert_level", &self.alert_level);
        push_str(&mut pairs, "user_id", &self.user_id);
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

impl ToQuery for TimelineQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = self.window.query_pairs();
        // group_by has a default and is always sent
        pairs.push(("group_by", self.group_by.to_string()));
        push_str(&mut pairs, "alert_type", &self.alert_type);
        pairs
    }
}

/// Reject filters the backend would refuse
pub fn validate_filter(filter: &AnomalyEventFilter) -> ClientResult<()> {
    if let Some(limit) = filter.limit {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(ClientError::InvalidQuery(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, limit
            )));
        }
    }
    Ok(())
}

/// Percent-encode pairs into `key=value&...` (no leading `?`)
pub fn encode_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Join a base URL, path and query into a request URL
pub fn build_url(base_url: &str, path: &str, pairs: &[(&'static str, String)]) -> String {
    let query = encode_query(pairs);
    if query.is_empty() {
        format!("{}{}", base_url, path)
    } else {
        format!("{}{}?{}", base_url, path, query)
    }
}
