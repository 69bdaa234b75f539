//! Event detail page

use super::layout::{error_panel, html_escape, loading_panel, page, Nav, Retry};
use crate::models::{non_empty, AnomalyEvent, JsonMap};
use crate::view::charts::{format_timestamp, level_color, or_na, pretty_json};
use crate::view::DetailState;

/// Render the detail page. `self_href` is the page's own URL, used for retry.
pub fn render(state: &DetailState, self_href: &str) -> String {
    let mut body = String::with_capacity(4096);
    body.push_str("<a href=\"/events\">&larr; Back to Events</a>\n");

    match state {
        DetailState::Loading => body.push_str(&loading_panel("Loading event...")),
        DetailState::Error(message) => {
            body.push_str(&error_panel(message, Retry::Link(self_href)));
        }
        DetailState::NotFound => {
            body.push_str("<div class=\"panel notice\"><p>Event not found</p></div>\n");
        }
        DetailState::Found(event) => push_event(&mut body, event),
    }

    page("Event Details", Nav::Events, "", &body)
}

fn push_event(body: &mut String, event: &AnomalyEvent) {
    body.push_str("<div class=\"panel\">\n<div class=\"header\"><h2>Event Details</h2>");
    if event.is_alert() {
        body.push_str("<span class=\"badge badge-red\">Alert</span>");
    }
    body.push_str("</div>\n");

    body.push_str("<h3>Basic Information</h3>\n<dl class=\"fields\">\n");
    push_field(body, "Event ID", &format!("<code>{}</code>", html_escape(&event.id)));
    push_field(
        body,
        "Timestamp",
        &html_escape(&format_timestamp(event.timestamp.as_deref())),
    );
    push_field(body, "Alert Type", &html_escape(or_na(event.alert_type.as_deref())));

    let level = match non_empty(&event.alert_level) {
        Some(level) => format!(
            "<span class=\"{}\">{}</span>",
            level_color(Some(level)).badge_class(),
            html_escape(level)
        ),
        None => "<span class=\"muted\">N/A</span>".to_string(),
    };
    push_field(body, "Alert Level", &level);
    push_field(body, "User ID", &html_escape(or_na(event.user_id.as_deref())));

    let is_alert = if event.is_alert() {
        "<span class=\"badge badge-red\">Yes</span>"
    } else {
        "<span class=\"badge badge-green\">No</span>"
    };
    push_field(body, "Is Alert", is_alert);
    body.push_str("</dl>\n");

    if event.has_alert_details() {
        body.push_str("<h3>Alert Information</h3>\n<dl>\n");
        if let Some(title) = non_empty(&event.alert_title) {
            push_field(body, "Title", &html_escape(title));
        }
        if let Some(message) = non_empty(&event.alert_message) {
            push_field(
                body,
                "Message",
                &format!("<span style=\"white-space:pre-wrap\">{}</span>", html_escape(message)),
            );
        }
        body.push_str("</dl>\n");
    }

    push_json_section(body, "Tags", event.tags.as_ref());
    push_json_section(body, "Metrics", event.metrics.as_ref());

    body.push_str("</div>\n");
}

fn push_field(body: &mut String, label: &str, value_html: &str) {
    body.push_str(&format!("<div><dt>{}</dt><dd>{}</dd></div>\n", label, value_html));
}

/// Omitted when the map is absent or empty
fn push_json_section(body: &mut String, title: &str, map: Option<&JsonMap>) {
    let Some(map) = map.filter(|m| !m.is_empty()) else {
        return;
    };
    body.push_str(&format!(
        "<h3>{}</h3>\n<pre>{}</pre>\n",
        title,
        html_escape(&pretty_json(map))
    ));
}
