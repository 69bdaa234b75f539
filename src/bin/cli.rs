//! Anomaly Dashboard CLI
//!
//! Command-line interface over the monitoring API:
//! - Dashboard overview, timeline and service summary
//! - Event listing with filters, single event lookup
//! - Live dashboard (`watch`) on the same 30 second refresh timer
//! - Config file generation

use anomaly_dashboard::client::{AnomalyApi, HttpClient};
use anomaly_dashboard::config::{generate_default_config, Config, LoggingConfig};
use anomaly_dashboard::logging::init_tracing;
use anomaly_dashboard::models::{
    AlertTimelineResponse, AnomalyEvent, AnomalyEventStats, DashboardOverview, GroupBy,
    ServiceAlertSummary, TimeWindow, TimelineQuery,
};
use anomaly_dashboard::view::charts::{
    format_alert_rate, format_count, format_timestamp, level_color, or_na, pie_series,
    pretty_json, stat_cards, timeline_points,
};
use anomaly_dashboard::view::{
    DashboardData, DashboardState, DashboardViewModel, DetailState, EventDetailViewModel,
    EventFilters, EventsViewModel, LoadState, MAX_PAGE, PAGE_SIZE,
};
use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "anomaly-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect anomaly events and alerts from the monitoring API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Monitoring API URL (overrides config and ANOMALY_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Show request logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dashboard overview: totals, alert rate, alerts by level and type
    Overview {
        /// Only the last N (e.g., 24h, 7d, 2w)
        #[arg(short, long)]
        since: Option<String>,
    },

    /// Alert timeline
    Timeline {
        /// Bucket width (hour, day, week)
        #[arg(short, long, default_value = "hour")]
        group_by: GroupBy,
        /// Only this alert type
        #[arg(short, long)]
        alert_type: Option<String>,
        /// Only the last N (e.g., 24h, 7d, 2w)
        #[arg(short, long)]
        since: Option<String>,
    },

    /// Per-service alert summary
    Services {
        /// Only the last N (e.g., 24h, 7d, 2w)
        #[arg(short, long)]
        since: Option<String>,
    },

    /// Event statistics
    Stats {
        /// Only the last N (e.g., 24h, 7d, 2w)
        #[arg(short, long)]
        since: Option<String>,
    },

    /// List events, 50 per page
    Events {
        /// Only alerts (true) or only non-alerts (false)
        #[arg(long)]
        is_alert: Option<bool>,
        /// Alert type
        #[arg(short = 't', long)]
        alert_type: Option<String>,
        /// Alert level (CRITICAL, WARNING, INFO)
        #[arg(short = 'l', long)]
        level: Option<String>,
        /// User ID
        #[arg(short, long)]
        user: Option<String>,
        /// Page number, starting at 0
        #[arg(
            short,
            long,
            default_value = "0",
            value_parser = clap::value_parser!(u32).range(0..=MAX_PAGE as i64)
        )]
        page: u32,
    },

    /// Show one event
    Event {
        /// Event ID
        id: String,
    },

    /// Check the monitoring API
    Health,

    /// Live dashboard, refreshed every 30 seconds until Ctrl+C
    Watch,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.upstream.base_url = url.clone();
    }

    let logging = if cli.verbose {
        LoggingConfig {
            level: "debug".to_string(),
            ..config.logging.clone()
        }
    } else {
        LoggingConfig {
            level: "warn".to_string(),
            ..config.logging.clone()
        }
    };
    init_tracing(&logging)?;

    let json = match cli.format.as_str() {
        "json" => true,
        "table" => false,
        other => bail!("Unknown output format: {}. Use: table, json", other),
    };

    let client = HttpClient::new(config.upstream.client_config())
        .context("failed to create API client")?;
    let api: Arc<dyn AnomalyApi> = Arc::new(client);

    match cli.command {
        Commands::Overview { since } => {
            let window = window_since(since.as_deref())?;
            let overview = api.dashboard_overview(&window).await?;
            if json {
                print_json(&overview)?;
            } else {
                print_overview(&overview, &AlertTimelineResponse::default());
            }
        }

        Commands::Timeline {
            group_by,
            alert_type,
            since,
        } => {
            let mut query = TimelineQuery::hourly()
                .group_by(group_by)
                .window(window_since(since.as_deref())?);
            if let Some(alert_type) = alert_type {
                query = query.alert_type(alert_type);
            }

            let timeline = api.timeline(&query).await?;
            if json {
                print_json(&timeline)?;
            } else {
                print_timeline(&timeline);
            }
        }

        Commands::Services { since } => {
            let window = window_since(since.as_deref())?;
            let services = api.services(&window).await?;
            if json {
                print_json(&services)?;
            } else {
                print_services(&services);
            }
        }

        Commands::Stats { since } => {
            let window = window_since(since.as_deref())?;
            let stats = api.event_stats(&window).await?;
            if json {
                print_json(&stats)?;
            } else {
                print_stats(&stats);
            }
        }

        Commands::Events {
            is_alert,
            alert_type,
            level,
            user,
            page,
        } => {
            let filters = EventFilters {
                is_alert,
                alert_type: alert_type.unwrap_or_default(),
                alert_level: level.unwrap_or_default(),
                user_id: user.unwrap_or_default(),
            };

            let mut vm = EventsViewModel::restore(Arc::clone(&api), filters, page);
            vm.load().await;

            if let Some(message) = vm.state().error() {
                bail!("{}", message);
            }
            if json {
                print_json(&vm.events())?;
            } else {
                print_events(&vm);
            }
        }

        Commands::Event { id } => {
            let mut vm = EventDetailViewModel::new(Arc::clone(&api));
            vm.set_event_id(id.as_str()).await;

            match vm.state() {
                DetailState::Found(event) if json => print_json(event)?,
                DetailState::Found(event) => print_event(event),
                DetailState::NotFound => bail!("Event not found: {}", id),
                DetailState::Error(message) => bail!("{}", message),
                DetailState::Loading => {}
            }
        }

        Commands::Health => match api.health_check().await {
            Ok(health) if json => print_json(&health)?,
            Ok(health) => {
                println!("Monitoring API at {}", config.upstream.base_url);
                println!();
                println!("Status:  {}", health.status);
                println!("Service: {}", health.service);
                println!("Version: {}", health.version);
            }
            Err(e) => {
                eprintln!("Cannot reach the monitoring API at {}", config.upstream.base_url);
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Set the URL with --api-url or ANOMALY_API_URL.");
                std::process::exit(1);
            }
        },

        Commands::Watch => watch(api, json).await?,

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Print every settled dashboard state until Ctrl+C
async fn watch(api: Arc<dyn AnomalyApi>, json: bool) -> anyhow::Result<()> {
    let dashboard = DashboardViewModel::mount(api);
    let mut updates = dashboard.subscribe();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let initial = updates.borrow_and_update().clone();
    print_dashboard_state(&initial, json)?;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                print_dashboard_state(&state, json)?;
            }
            _ = &mut ctrl_c => break,
        }
    }

    dashboard.unmount();
    Ok(())
}

fn print_dashboard_state(state: &DashboardState, json: bool) -> anyhow::Result<()> {
    match state {
        LoadState::Loading { .. } => {}
        LoadState::Ready(data) if json => print_json(&WatchFrame::from(data))?,
        LoadState::Ready(data) => {
            println!(
                "=== {} ===",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            );
            print_overview(&data.overview, &data.timeline);
            println!();
            print_services(&data.services);
            println!();
        }
        LoadState::Error(message) => {
            eprintln!("Refresh failed: {} (retrying in 30s)", message);
        }
    }
    Ok(())
}

/// One `watch --format json` line
#[derive(Serialize)]
struct WatchFrame<'a> {
    overview: &'a DashboardOverview,
    timeline: &'a AlertTimelineResponse,
    services: &'a [ServiceAlertSummary],
}

impl<'a> From<&'a DashboardData> for WatchFrame<'a> {
    fn from(data: &'a DashboardData) -> Self {
        Self {
            overview: &data.overview,
            timeline: &data.timeline,
            services: &data.services,
        }
    }
}

/// Window from now back to `since` ago; unbounded without `since`
fn window_since(since: Option<&str>) -> anyhow::Result<TimeWindow> {
    let Some(since) = since else {
        return Ok(TimeWindow::unbounded());
    };
    let start = Utc::now()
        .checked_sub_signed(parse_duration(since)?)
        .with_context(|| format!("Duration out of range: {}", since))?;
    Ok(TimeWindow::new(
        Some(start.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None,
    ))
}

fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim().to_lowercase();

    let (amount, to_duration): (&str, fn(i64) -> Option<Duration>) =
        if let Some(hours) = s.strip_suffix('h') {
            (hours, Duration::try_hours)
        } else if let Some(days) = s.strip_suffix('d') {
            (days, Duration::try_days)
        } else if let Some(weeks) = s.strip_suffix('w') {
            (weeks, Duration::try_weeks)
        } else {
            bail!("Invalid duration format: {}. Use: 24h, 7d, 2w", s)
        };

    let amount: i64 = amount
        .parse()
        .with_context(|| format!("Invalid duration format: {}. Use: 24h, 7d, 2w", s))?;
    match to_duration(amount) {
        Some(duration) => Ok(duration),
        None => bail!("Duration out of range: {}", s),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_overview(overview: &DashboardOverview, timeline: &AlertTimelineResponse) {
    for card in stat_cards(overview, timeline) {
        // Peak time is only known with a timeline
        if card.title == "Peak Alert Time" && timeline.timeline.is_empty() {
            continue;
        }
        println!("{:<16} {}", card.title, card.value);
    }

    for (title, counts) in [
        ("Alerts by Level", &overview.alerts_by_level),
        ("Alerts by Type", &overview.alerts_by_type),
    ] {
        println!();
        println!("{}:", title);
        let series = pie_series(counts);
        if series.is_empty() {
            println!("  (none)");
        }
        for slice in series {
            println!("  {:<20} {:>8}", slice.name, format_count(slice.value));
        }
    }
}

fn print_timeline(timeline: &AlertTimelineResponse) {
    let points = timeline_points(timeline);
    if points.is_empty() {
        println!("No timeline data");
        return;
    }

    println!("{:<22} {:>8} {:>8} {:>8}", "Bucket", "Alerts", "Total", "Rate %");
    println!("{}", "-".repeat(50));
    for (trend, point) in timeline.timeline.iter().zip(points) {
        println!(
            "{:<22} {:>8} {:>8} {:>8}",
            format_timestamp(Some(&trend.time_range)),
            format_count(point.alerts),
            format_count(point.total),
            point.rate
        );
    }
    println!();
    println!("Total alerts: {}", format_count(timeline.total_alerts));
    println!(
        "Peak:         {}",
        format_timestamp(timeline.peak_alert_time.as_deref())
    );
}

fn print_services(services: &[ServiceAlertSummary]) {
    if services.is_empty() {
        println!("No services reported alerts");
        return;
    }

    println!(
        "{:<24} {:>8} {:>9} {:>8}  {}",
        "Service", "Total", "Critical", "Warning", "Last Alert"
    );
    println!("{}", "-".repeat(72));
    for service in services {
        println!(
            "{:<24} {:>8} {:>9} {:>8}  {}",
            service.service,
            format_count(service.total_alerts),
            format_count(service.critical_alerts),
            format_count(service.warning_alerts),
            format_timestamp(service.last_alert_time.as_deref())
        );
    }
}

fn print_stats(stats: &AnomalyEventStats) {
    let rate = if stats.total_events > 0 {
        stats.alert_count as f64 / stats.total_events as f64
    } else {
        0.0
    };

    println!("Total events: {}", format_count(stats.total_events));
    println!("Alerts:       {}", format_count(stats.alert_count));
    println!("Alert rate:   {}", format_alert_rate(rate));

    for (title, counts) in [("By type", &stats.alert_by_type), ("By level", &stats.alert_by_level)] {
        println!();
        println!("{}:", title);
        for slice in pie_series(counts) {
            println!("  {:<20} {:>8}", slice.name, format_count(slice.value));
        }
    }
}

fn print_events(vm: &EventsViewModel) {
    let events = vm.events();
    if events.is_empty() {
        println!("No events found");
        return;
    }

    println!(
        "{:<20} {:<16} {:<9} {:<30} {}",
        "Timestamp", "Alert Type", "Level", "Title", "ID"
    );
    println!("{}", "-".repeat(100));
    for event in events {
        println!(
            "{:<20} {:<16} {:<9} {:<30} {}",
            format_timestamp(event.timestamp.as_deref()),
            or_na(event.alert_type.as_deref()),
            or_na(event.alert_level.as_deref()),
            truncate(or_na(event.alert_title.as_deref()), 30),
            event.id
        );
    }

    println!();
    print!("Showing {} events (page {})", events.len(), vm.page());
    if vm.can_go_next() {
        print!(", next: --page {}", vm.page() + 1);
    } else if events.len() < PAGE_SIZE as usize {
        print!(", last page");
    }
    println!();
}

fn print_event(event: &AnomalyEvent) {
    println!("Event {}", event.id);
    if event.is_alert() {
        println!("[ALERT]");
    }
    println!();
    println!("Timestamp:   {}", format_timestamp(event.timestamp.as_deref()));
    println!("Alert Type:  {}", or_na(event.alert_type.as_deref()));
    println!(
        "Alert Level: {} ({})",
        or_na(event.alert_level.as_deref()),
        level_color(event.alert_level.as_deref()).name()
    );
    println!("User ID:     {}", or_na(event.user_id.as_deref()));
    println!("Is Alert:    {}", if event.is_alert() { "Yes" } else { "No" });

    if event.has_alert_details() {
        println!();
        if let Some(title) = event.alert_title.as_deref().filter(|t| !t.is_empty()) {
            println!("Title:   {}", title);
        }
        if let Some(message) = event.alert_message.as_deref().filter(|m| !m.is_empty()) {
            println!("Message: {}", message);
        }
    }

    for (title, map) in [("Tags", &event.tags), ("Metrics", &event.metrics)] {
        if let Some(map) = map.as_ref().filter(|m| !m.is_empty()) {
            println!();
            println!("{}:", title);
            println!("{}", pretty_json(map));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
