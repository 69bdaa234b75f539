//! Page shell and shared fragments

/// Top navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Dashboard,
    Events,
}

/// Wrap a body fragment into a complete HTML document
pub fn page(title: &str, active: Nav, extra_head: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} | Anomaly Dashboard</title>\n",
        html_escape(title)
    ));
    html.push_str(extra_head);
    push_style(&mut html);
    html.push_str("</head>\n<body>\n");

    html.push_str("<nav class=\"topbar\">\n<span class=\"brand\">Anomaly Monitoring</span>\n");
    for (nav, href, label) in [(Nav::Dashboard, "/", "Dashboard"), (Nav::Events, "/events", "Events")] {
        let class = if nav == active { " class=\"active\"" } else { "" };
        html.push_str(&format!("<a href=\"{}\"{}>{}</a>\n", href, class, label));
    }
    html.push_str("</nav>\n<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>");
    html
}

/// Spinner with a caption
pub fn loading_panel(caption: &str) -> String {
    format!(
        "<div class=\"panel loading\"><div class=\"spinner\"></div><p>{}</p></div>\n",
        html_escape(caption)
    )
}

/// Inline error with a retry control.
///
/// `retry` is either a POST form action or a GET link.
pub fn error_panel(message: &str, retry: Retry<'_>) -> String {
    let control = match retry {
        Retry::Post(action) => format!(
            "<form method=\"post\" action=\"{}\"><button type=\"submit\" class=\"btn\">Retry</button></form>",
            html_escape(action)
        ),
        Retry::Link(href) => format!(
            "<a class=\"btn\" href=\"{}\">Retry</a>",
            html_escape(href)
        ),
    };
    format!(
        "<div class=\"panel error\"><p>Error: {}</p>{}</div>\n",
        html_escape(message),
        control
    )
}

/// How an error panel offers a retry
#[derive(Debug, Clone, Copy)]
pub enum Retry<'a> {
    Post(&'a str),
    Link(&'a str),
}

/// Escape text for HTML bodies and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn push_style(html: &mut String) {
    html.push_str("<style>\n");
    html.push_str(
        "body{margin:0;font-family:system-ui,-apple-system,sans-serif;background:#f3f4f6;color:#111827}\n\
         .topbar{display:flex;gap:1.5rem;align-items:center;padding:.9rem 2rem;background:#fff;border-bottom:1px solid #e5e7eb}\n\
         .topbar a{color:#4b5563;text-decoration:none}.topbar a.active{color:#2563eb;font-weight:600}\n\
         .brand{font-weight:700;margin-right:1rem}\n\
         main{max-width:1200px;margin:0 auto;padding:1.5rem 2rem}\n\
         .header{display:flex;justify-content:space-between;align-items:center}\n\
         .panel{background:#fff;border-radius:.5rem;box-shadow:0 1px 2px rgba(0,0,0,.08);padding:1rem 1.25rem;margin:1rem 0}\n\
         .panel.error{background:#fef2f2;border:1px solid #fecaca;color:#991b1b}\n\
         .panel.notice{background:#fefce8;border:1px solid #fde68a;color:#854d0e}\n\
         .loading{text-align:center;color:#4b5563}\n\
         .spinner{width:2.5rem;height:2.5rem;margin:1rem auto;border-radius:50%;border:3px solid #dbeafe;border-top-color:#2563eb}\n\
         .cards{display:grid;grid-template-columns:repeat(4,1fr);gap:1rem}\n\
         .card{background:#fff;border-radius:.5rem;padding:1rem;border-left:4px solid var(--accent)}\n\
         .card .title{font-size:.85rem;color:#4b5563}.card .value{font-size:1.6rem;font-weight:700;margin-top:.4rem}\n\
         .grid2{display:grid;grid-template-columns:1fr 1fr;gap:1rem}\n\
         .bar-row{display:grid;grid-template-columns:8rem 1fr 5rem;gap:.5rem;align-items:center;margin:.25rem 0;font-size:.85rem}\n\
         .bar{height:.9rem;border-radius:.2rem;background:var(--color)}\n\
         table{width:100%;border-collapse:collapse;font-size:.9rem}\n\
         th{text-align:left;font-size:.75rem;text-transform:uppercase;color:#6b7280;background:#f9fafb}\n\
         th,td{padding:.6rem .8rem;border-bottom:1px solid #e5e7eb}\n\
         .badge{display:inline-block;padding:.1rem .55rem;border-radius:999px;font-size:.75rem;font-weight:600}\n\
         .badge-red{background:#fee2e2;color:#991b1b}.badge-yellow{background:#fef9c3;color:#854d0e}\n\
         .badge-blue{background:#dbeafe;color:#1e40af}.badge-gray{background:#f3f4f6;color:#1f2937}\n\
         .badge-green{background:#dcfce7;color:#166534}\n\
         .btn{display:inline-block;padding:.45rem 1rem;border-radius:.4rem;border:1px solid #2563eb;background:#2563eb;color:#fff;text-decoration:none;cursor:pointer}\n\
         .btn.secondary{background:#fff;color:#374151;border-color:#d1d5db}\n\
         .btn.disabled{opacity:.5;pointer-events:none}\n\
         .filters{display:grid;grid-template-columns:repeat(4,1fr) auto;gap:1rem;align-items:end}\n\
         .filters label{display:block;font-size:.8rem;color:#374151;margin-bottom:.25rem}\n\
         .filters input,.filters select{width:100%;padding:.4rem;border:1px solid #d1d5db;border-radius:.4rem}\n\
         .pager{display:flex;justify-content:space-between;align-items:center;margin-top:.75rem}\n\
         dl.fields{display:grid;grid-template-columns:1fr 1fr;gap:1rem}dt{font-size:.8rem;color:#6b7280}dd{margin:.25rem 0 0}\n\
         pre{background:#f9fafb;padding:.75rem;border-radius:.4rem;overflow-x:auto}\n\
         .muted{color:#6b7280;font-size:.85rem}\n",
    );
    html.push_str("</style>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_marks_active_nav() {
        let html = page("Events", Nav::Events, "", "<p>body</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Events | Anomaly Dashboard</title>"));
        assert!(html.contains("<a href=\"/events\" class=\"active\">Events</a>"));
        assert!(html.contains("<a href=\"/\">Dashboard</a>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_error_panel_retry_controls() {
        let post = error_panel("upstream <down>", Retry::Post("/refresh"));
        assert!(post.contains("Error: upstream &lt;down&gt;"));
        assert!(post.contains("<form method=\"post\" action=\"/refresh\">"));

        let link = error_panel("boom", Retry::Link("/events?page=2"));
        assert!(link.contains("href=\"/events?page=2\""));
    }
}
