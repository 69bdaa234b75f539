//! Dashboard page

use super::layout::{error_panel, html_escape, loading_panel, page, Nav, Retry};
use crate::view::charts::{
    format_count, format_timestamp, level_color, palette_color, series_total, share_percent,
    LevelColor, PieSlice, TimelinePoint,
};
use crate::view::{DashboardData, DashboardState, REFRESH_INTERVAL};

/// Render the dashboard for the current view-model state
pub fn render(state: &DashboardState) -> String {
    let mut body = String::with_capacity(8192);

    body.push_str("<div class=\"header\">\n<h2>Dashboard Overview</h2>\n");
    body.push_str("<form method=\"post\" action=\"/refresh\"><button type=\"submit\" class=\"btn\">Refresh</button></form>\n");
    body.push_str("</div>\n");

    match state {
        DashboardState::Loading { previous: None } => {
            body.push_str(&loading_panel("Loading dashboard..."));
        }
        DashboardState::Loading {
            previous: Some(data),
        } => {
            body.push_str("<p class=\"muted\">Refreshing...</p>\n");
            push_data(&mut body, data);
        }
        DashboardState::Ready(data) => push_data(&mut body, data),
        DashboardState::Error(message) => {
            body.push_str(&error_panel(message, Retry::Post("/refresh")));
        }
    }

    let refresh = format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        REFRESH_INTERVAL.as_secs()
    );
    page("Dashboard", Nav::Dashboard, &refresh, &body)
}

fn push_data(body: &mut String, data: &DashboardData) {
    // Stat cards
    body.push_str("<div class=\"cards\">\n");
    for card in data.stat_cards() {
        body.push_str(&format!(
            "<div class=\"card\" style=\"--accent:{}\"><div class=\"title\">{}</div><div class=\"value\">{}</div></div>\n",
            accent_color(card.accent),
            card.title,
            html_escape(&card.value)
        ));
    }
    body.push_str("</div>\n");

    let points = data.timeline_points();
    body.push_str("<div class=\"grid2\">\n");
    push_timeline(body, &points);
    push_rate_trend(body, &points);
    push_level_breakdown(body, &data.alerts_by_level());
    push_type_breakdown(body, &data.alerts_by_type());
    body.push_str("</div>\n");

    push_services(body, data);
}

fn push_timeline(body: &mut String, points: &[TimelinePoint]) {
    body.push_str("<section class=\"panel\">\n<h3>Alert Timeline (Last 24 Hours)</h3>\n");
    if points.is_empty() {
        body.push_str("<p class=\"muted\">No timeline data</p>\n");
    }
    let max = points.iter().map(|p| p.total).max().unwrap_or(0);
    for point in points {
        body.push_str(&format!(
            "<div class=\"bar-row\"><span>{}</span><div><div class=\"bar\" style=\"--color:#ef4444;width:{}%\" title=\"Alerts\"></div><div class=\"bar\" style=\"--color:#3b82f6;width:{}%\" title=\"Total Events\"></div></div><span>{} / {}</span></div>\n",
            html_escape(&point.time),
            share_percent(point.alerts, max),
            share_percent(point.total, max),
            format_count(point.alerts),
            format_count(point.total)
        ));
    }
    body.push_str("</section>\n");
}

fn push_rate_trend(body: &mut String, points: &[TimelinePoint]) {
    body.push_str("<section class=\"panel\">\n<h3>Alert Rate Trend</h3>\n");
    if points.is_empty() {
        body.push_str("<p class=\"muted\">No timeline data</p>\n");
    }
    for point in points {
        body.push_str(&format!(
            "<div class=\"bar-row\"><span>{}</span><div class=\"bar\" style=\"--color:#f59e0b;width:{}%\"></div><span>{}%</span></div>\n",
            html_escape(&point.time),
            html_escape(&point.rate),
            html_escape(&point.rate)
        ));
    }
    body.push_str("</section>\n");
}

fn push_level_breakdown(body: &mut String, slices: &[PieSlice]) {
    body.push_str("<section class=\"panel\">\n<h3>Alerts by Level</h3>\n");
    let total = series_total(slices);
    if slices.is_empty() {
        body.push_str("<p class=\"muted\">No alerts</p>\n");
    }
    for slice in slices {
        let color = level_color(Some(&slice.name));
        let share = share_percent(slice.value, total);
        body.push_str(&format!(
            "<div class=\"bar-row\"><span class=\"{}\">{}</span><div class=\"bar\" style=\"--color:{};width:{}%\"></div><span>{}: {}%</span></div>\n",
            color.badge_class(),
            html_escape(&slice.name),
            level_hex(color),
            share,
            format_count(slice.value),
            share
        ));
    }
    body.push_str("</section>\n");
}

fn push_type_breakdown(body: &mut String, slices: &[PieSlice]) {
    body.push_str("<section class=\"panel\">\n<h3>Alerts by Type</h3>\n");
    let max = slices.iter().map(|s| s.value).max().unwrap_or(0);
    if slices.is_empty() {
        body.push_str("<p class=\"muted\">No alerts</p>\n");
    }
    for (i, slice) in slices.iter().enumerate() {
        body.push_str(&format!(
            "<div class=\"bar-row\"><span>{}</span><div class=\"bar\" style=\"--color:{};width:{}%\"></div><span>{}</span></div>\n",
            html_escape(&slice.name),
            palette_color(i),
            share_percent(slice.value, max),
            format_count(slice.value)
        ));
    }
    body.push_str("</section>\n");
}

fn push_services(body: &mut String, data: &DashboardData) {
    body.push_str("<section class=\"panel\">\n<h3>Service Alert Summary</h3>\n");
    body.push_str(
        "<table>\n<thead><tr><th>Service</th><th>Total Alerts</th><th>Critical</th><th>Warning</th><th>Last Alert</th></tr></thead>\n<tbody>\n",
    );
    if data.services.is_empty() {
        body.push_str("<tr><td colspan=\"5\" class=\"muted\">No services reported alerts</td></tr>\n");
    }
    for service in &data.services {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td><span class=\"badge badge-red\">{}</span></td><td><span class=\"badge badge-yellow\">{}</span></td><td>{}</td></tr>\n",
            html_escape(&service.service),
            format_count(service.total_alerts),
            format_count(service.critical_alerts),
            format_count(service.warning_alerts),
            html_escape(&format_timestamp(service.last_alert_time.as_deref()))
        ));
    }
    body.push_str("</tbody>\n</table>\n</section>\n");
}

fn accent_color(accent: &str) -> &'static str {
    match accent {
        "blue" => "#3b82f6",
        "red" => "#ef4444",
        "orange" => "#f59e0b",
        "green" => "#10b981",
        _ => "#9ca3af",
    }
}

fn level_hex(color: LevelColor) -> &'static str {
    match color {
        LevelColor::Red => "#ef4444",
        LevelColor::Yellow => "#f59e0b",
        LevelColor::Blue => "#3b82f6",
        LevelColor::Gray => "#9ca3af",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{sample_overview, sample_services, sample_timeline};
    use crate::view::LoadState;

    fn sample_data() -> DashboardData {
        DashboardData {
            overview: sample_overview(),
            timeline: sample_timeline(),
            services: sample_services(),
        }
    }

    #[test]
    fn test_ready_renders_cards_and_tables() {
        let html = render(&LoadState::Ready(sample_data()));

        assert!(html.contains("<div class=\"title\">Total Events</div><div class=\"value\">120</div>"));
        assert!(html.contains("<div class=\"value\">6.67%</div>"));
        assert!(html.contains("<div class=\"value\">10:00</div>"));
        assert!(html.contains("<td>checkout</td>"));
        assert!(html.contains("2024-05-01 10:42:17"));
        assert!(html.contains("CRITICAL"));
        assert!(html.contains("3: 38%"));
        assert!(html.contains("<span>20.0%</span>"));
        assert!(html.contains("http-equiv=\"refresh\" content=\"30\""));
    }

    #[test]
    fn test_loading_without_data() {
        let html = render(&LoadState::Loading { previous: None });
        assert!(html.contains("Loading dashboard..."));
        assert!(!html.contains("class=\"cards\""));
    }

    #[test]
    fn test_refreshing_keeps_previous_data() {
        let html = render(&LoadState::Loading {
            previous: Some(sample_data()),
        });
        assert!(html.contains("Refreshing..."));
        assert!(html.contains("<div class=\"value\">120</div>"));
    }

    #[test]
    fn test_error_has_retry_form() {
        let html = render(&LoadState::Error("Network error: connection refused".to_string()));
        assert!(html.contains("Error: Network error: connection refused"));
        assert!(html.contains("<button type=\"submit\" class=\"btn\">Retry</button>"));
        assert!(!html.contains("class=\"cards\""));
    }

    #[test]
    fn test_missing_last_alert_time_is_na() {
        let mut data = sample_data();
        data.services[0].last_alert_time = None;
        let html = render(&LoadState::Ready(data));
        assert!(html.contains("<td>N/A</td>"));
    }
}
