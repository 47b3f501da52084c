//! calstats - Calendar time-tracking statistics dashboard

mod cli;

use anyhow::{bail, Context, Result};
use calstats_core::models::interval::{Interval, IntervalMode};
use calstats_core::{palette, CalendarClient, Dashboard, FilePreferences};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calstats",
    version,
    about = "Calendar time-tracking statistics dashboard",
    long_about = "Fetches calendar events from a calstats server and shows where the\n\
                  time of a reporting window went, broken down by category.\n\
                  \n\
                  Untagged events and time not covered by any event are grouped under\n\
                  the synthetic 'Unknown' category. Disabled categories are excluded\n\
                  from ranking and from the proportion denominator.\n\
                  \n\
                  Examples:\n\
                    calstats                             # This week's summary\n\
                    calstats summary --range month       # This month\n\
                    calstats summary --range custom --from 2026-01-01T00:00:00+01:00 \\\n\
                                     --to 2026-02-01T00:00:00+01:00\n\
                    calstats summary --disable Unknown   # Tracked time only\n\
                    calstats events --range day          # Raw event listing\n\
                    calstats calendars                   # Server configuration\n\
                  \n\
                  Environment Variables:\n\
                    CALSTATS_SERVER                      # Calendar service base URL\n\
                    CALSTATS_NO_COLOR                    # Disable ANSI colors"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Calendar service base URL
    #[arg(long, env = "CALSTATS_SERVER", default_value = "http://127.0.0.1:8003")]
    server: String,

    /// Preferences directory (default: <config dir>/calstats)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "CALSTATS_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show per-category time statistics for a reporting range (default)
    Summary {
        /// Reporting range: day, week, month, year, 3m, 6m, custom
        /// (default: last used)
        #[arg(long, short = 'r')]
        range: Option<String>,
        /// Custom range start, RFC 3339 (with --range custom)
        #[arg(long)]
        from: Option<String>,
        /// Custom range end, RFC 3339 (with --range custom)
        #[arg(long)]
        to: Option<String>,
        /// Exclude a category from ranking and proportions (repeatable)
        #[arg(long = "disable", value_name = "CATEGORY")]
        disabled: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the events of the reporting range
    Events {
        /// Reporting range: day, week, month, year, 3m, 6m, custom
        #[arg(long, short = 'r')]
        range: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which calendars the service aggregates
    Calendars,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Summary {
        range: None,
        from: None,
        to: None,
        disabled: Vec::new(),
        json: false,
    });
    let client = CalendarClient::new(cli.server.clone());

    match command {
        Command::Summary {
            range,
            from,
            to,
            disabled,
            json,
        } => run_summary(&cli, &client, range, from, to, disabled, json).await,
        Command::Events { range, json } => run_events(&cli, &client, range, json).await,
        Command::Calendars => run_calendars(&client).await,
    }
}

/// Preference directory: explicit flag or `<config dir>/calstats`
fn config_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    dirs::config_dir()
        .map(|d| d.join("calstats"))
        .context("Could not determine config directory")
}

/// Load the dashboard and apply the range arguments, persisting the
/// selection like the other frontends do
fn load_dashboard(
    cli: &Cli,
    range: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<Dashboard<FilePreferences>> {
    let prefs = FilePreferences::load(&config_dir(cli)?);
    let mut dashboard = Dashboard::load(prefs);

    if let Some(range) = range {
        dashboard.set_mode(cli::parse_range(&range)?);
    }

    match (from, to) {
        (Some(from), Some(to)) => {
            if dashboard.mode() != IntervalMode::Custom {
                bail!("--from/--to require --range custom");
            }
            let bounds = Interval::new(cli::parse_bound(&from)?, cli::parse_bound(&to)?);
            if !bounds.is_valid() {
                bail!("custom range ends before it starts");
            }
            dashboard.set_custom_bounds(bounds);
        }
        (None, None) => {}
        _ => bail!("--from and --to must be given together"),
    }

    Ok(dashboard)
}

async fn run_summary(
    cli: &Cli,
    client: &CalendarClient,
    range: Option<String>,
    from: Option<String>,
    to: Option<String>,
    disabled: Vec<String>,
    json: bool,
) -> Result<()> {
    let mut dashboard = load_dashboard(cli, range, from, to)?;

    dashboard
        .refresh(client)
        .await
        .with_context(|| format!("Failed to fetch events from {}", client.base_url()))?;

    let stats = dashboard
        .stats(&disabled)?
        .context("No event batch loaded")?;

    if json {
        println!("{}", cli::format_stats_json(&stats));
        return Ok(());
    }

    let colors: HashMap<String, String> = stats
        .iter()
        .map(|s| {
            let color = palette::color_for(dashboard.preferences(), &s.category);
            (s.category.clone(), color)
        })
        .collect();

    println!("{}", cli::format_interval_line(&dashboard.interval()));
    println!("{}", cli::format_stats_table(&stats, &colors, cli.no_color));

    Ok(())
}

async fn run_events(
    cli: &Cli,
    client: &CalendarClient,
    range: Option<String>,
    json: bool,
) -> Result<()> {
    let mut dashboard = load_dashboard(cli, range, None, None)?;

    dashboard
        .refresh(client)
        .await
        .with_context(|| format!("Failed to fetch events from {}", client.base_url()))?;
    let batch = dashboard.batch().context("No event batch loaded")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(batch).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!("{}", cli::format_interval_line(&dashboard.interval()));
    println!("{}", cli::format_events_table(batch, cli.no_color));

    Ok(())
}

async fn run_calendars(client: &CalendarClient) -> Result<()> {
    let info = client
        .calendars()
        .await
        .with_context(|| format!("Failed to query {}", client.base_url()))?;

    println!("Server:    {}", info.calendar_server);
    if info.names.is_empty() {
        println!("Calendars: (none configured)");
    } else {
        println!("Calendars:");
        for name in &info.names {
            println!("  - {name}");
        }
    }

    Ok(())
}
