//! Events list page

use super::layout::{error_panel, html_escape, loading_panel, page, Nav, Retry};
use crate::models::AnomalyEvent;
use crate::view::charts::{format_timestamp, level_color, or_na};
use crate::view::{EventFilters, EventsViewModel, LoadState};

/// `/events` URL for a filter set and page. Empty filters and page 0 are omitted.
pub fn events_href(filters: &EventFilters, page: u32) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if let Some(is_alert) = filters.is_alert {
        pairs.push(("is_alert", is_alert.to_string()));
    }
    for (key, value) in [
        ("alert_type", &filters.alert_type),
        ("alert_level", &filters.alert_level),
        ("user_id", &filters.user_id),
    ] {
        if !value.is_empty() {
            pairs.push((key, value.clone()));
        }
    }
    if page > 0 {
        pairs.push(("page", page.to_string()));
    }

    if pairs.is_empty() {
        return "/events".to_string();
    }
    let query: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    format!("/events?{}", query.join("&"))
}

/// Render the events page after a load
pub fn render(vm: &EventsViewModel) -> String {
    let filters = vm.filters();
    let current = events_href(filters, vm.page());
    let mut body = String::with_capacity(8192);

    body.push_str("<div class=\"header\">\n<h2>Anomaly Events</h2>\n");
    body.push_str(&format!(
        "<a class=\"btn\" href=\"{}\">Refresh</a>\n",
        html_escape(&current)
    ));
    body.push_str("</div>\n");

    push_filter_form(&mut body, filters);

    match vm.state() {
        LoadState::Error(message) => {
            body.push_str(&error_panel(message, Retry::Link(&current)));
        }
        LoadState::Loading { previous: None } => {
            body.push_str(&loading_panel("Loading events..."));
        }
        _ => {}
    }

    if vm.state().visible().is_some() {
        push_table(&mut body, vm.events());
    }

    push_pager(&mut body, vm);

    page("Events", Nav::Events, "", &body)
}

fn push_filter_form(body: &mut String, filters: &EventFilters) {
    // No page field: submitting a filter change always lands on page 0
    body.push_str("<form class=\"panel filters\" method=\"get\" action=\"/events\">\n");

    body.push_str("<div><label for=\"is_alert\">Alert Status</label><select id=\"is_alert\" name=\"is_alert\">");
    for (value, label, selected) in [
        ("", "All", filters.is_alert.is_none()),
        ("true", "Alerts Only", filters.is_alert == Some(true)),
        ("false", "Non-Alerts", filters.is_alert == Some(false)),
    ] {
        push_option(body, value, label, selected);
    }
    body.push_str("</select></div>\n");

    body.push_str(&format!(
        "<div><label for=\"alert_type\">Alert Type</label><input id=\"alert_type\" name=\"alert_type\" type=\"text\" placeholder=\"Filter by type...\" value=\"{}\"></div>\n",
        html_escape(&filters.alert_type)
    ));

    body.push_str("<div><label for=\"alert_level\">Alert Level</label><select id=\"alert_level\" name=\"alert_level\">");
    for (value, label) in [
        ("", "All Levels"),
        ("CRITICAL", "Critical"),
        ("WARNING", "Warning"),
        ("INFO", "Info"),
    ] {
        push_option(body, value, label, filters.alert_level == value);
    }
    body.push_str("</select></div>\n");

    body.push_str(&format!(
        "<div><label for=\"user_id\">User ID</label><input id=\"user_id\" name=\"user_id\" type=\"text\" placeholder=\"Filter by user...\" value=\"{}\"></div>\n",
        html_escape(&filters.user_id)
    ));

    body.push_str("<div><button type=\"submit\" class=\"btn\">Apply</button></div>\n</form>\n");
}

fn push_option(body: &mut String, value: &str, label: &str, selected: bool) {
    body.push_str(&format!(
        "<option value=\"{}\"{}>{}</option>",
        value,
        if selected { " selected" } else { "" },
        label
    ));
}

fn push_table(body: &mut String, events: &[AnomalyEvent]) {
    body.push_str("<div class=\"panel\">\n<table>\n");
    body.push_str("<thead><tr><th>Timestamp</th><th>Alert Type</th><th>Level</th><th>Title</th><th>User ID</th><th>Actions</th></tr></thead>\n<tbody>\n");

    if events.is_empty() {
        body.push_str("<tr><td colspan=\"6\" class=\"muted\">No events found</td></tr>\n");
    }

    for event in events {
        let level = match event.alert_level.as_deref().filter(|l| !l.is_empty()) {
            Some(level) => format!(
                "<span class=\"{}\">{}</span>",
                level_color(Some(level)).badge_class(),
                html_escape(level)
            ),
            None => "<span class=\"muted\">N/A</span>".to_string(),
        };

        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/events/{}\">View Details</a></td></tr>\n",
            html_escape(&format_timestamp(event.timestamp.as_deref())),
            html_escape(or_na(event.alert_type.as_deref())),
            level,
            html_escape(or_na(event.alert_title.as_deref())),
            html_escape(or_na(event.user_id.as_deref())),
            urlencoding::encode(&event.id)
        ));
    }
    body.push_str("</tbody>\n</table>\n</div>\n");
}

fn push_pager(body: &mut String, vm: &EventsViewModel) {
    let filters = vm.filters();
    let page = vm.page();

    body.push_str("<div class=\"pager\">\n");
    body.push_str(&format!(
        "<span class=\"muted\">Showing {} events</span>\n<div>",
        vm.events().len()
    ));

    if vm.can_go_previous() {
        body.push_str(&format!(
            "<a class=\"btn secondary\" href=\"{}\">Previous</a> ",
            html_escape(&events_href(filters, page - 1))
        ));
    } else {
        body.push_str("<span class=\"btn secondary disabled\">Previous</span> ");
    }

    if vm.can_go_next() {
        body.push_str(&format!(
            "<a class=\"btn secondary\" href=\"{}\">Next</a>",
            html_escape(&events_href(filters, page + 1))
        ));
    } else {
        body.push_str("<span class=\"btn secondary disabled\">Next</span>");
    }
    body.push_str("</div>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{sample_events, MockApi};
    use std::sync::Arc;

    #[test]
    fn test_events_href() {
        assert_eq!(events_href(&EventFilters::default(), 0), "/events");

        let filters = EventFilters {
            is_alert: Some(true),
            alert_type: "error rate".to_string(),
            ..Default::default()
        };
        assert_eq!(
            events_href(&filters, 2),
            "/events?is_alert=true&alert_type=error%20rate&page=2"
        );
    }

    #[tokio::test]
    async fn test_first_full_page() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api);
        vm.load().await;
        let html = render(&vm);

        assert!(html.contains("Showing 50 events"));
        assert!(html.contains("<span class=\"btn secondary disabled\">Previous</span>"));
        assert!(html.contains("href=\"/events?page=1\">Next</a>"));
        assert!(html.contains("<a href=\"/events/evt-0\">View Details</a>"));
        assert!(html.contains("2024-05-01 10:00:00"));
    }

    #[tokio::test]
    async fn test_short_last_page_disables_next() {
        let api = Arc::new(MockApi::with_events(sample_events(60)));
        let mut vm = EventsViewModel::restore(api, EventFilters::default(), 1);
        vm.load().await;
        let html = render(&vm);

        assert!(html.contains("Showing 10 events"));
        assert!(html.contains("<span class=\"btn secondary disabled\">Next</span>"));
        assert!(html.contains("href=\"/events\">Previous</a>"));
    }

    #[tokio::test]
    async fn test_filters_kept_in_form_and_links() {
        let api = Arc::new(MockApi::new());
        let filters = EventFilters {
            alert_level: "WARNING".to_string(),
            user_id: "u-\"7\"".to_string(),
            ..Default::default()
        };
        let mut vm = EventsViewModel::restore(api, filters, 0);
        vm.load().await;
        let html = render(&vm);

        assert!(html.contains("<option value=\"WARNING\" selected>Warning</option>"));
        assert!(html.contains("value=\"u-&quot;7&quot;\""));
        assert!(html.contains("alert_level=WARNING&amp;user_id=u-%227%22&amp;page=1"));
        assert!(!html.contains("name=\"page\""));
    }

    #[tokio::test]
    async fn test_error_and_empty_states() {
        let api = Arc::new(MockApi::with_events(Vec::new()));
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        assert!(render(&vm).contains("No events found"));

        api.fail("list_events");
        vm.reload().await;
        let html = render(&vm);
        assert!(html.contains("Error: Network error: list_events unavailable"));
        assert!(html.contains("<a class=\"btn\" href=\"/events\">Retry</a>"));
        assert!(!html.contains("No events found"));
    }
}
