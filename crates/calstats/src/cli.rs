//! Argument parsing helpers and output formatting
//!
//! Renders the ranked category statistics and the raw event listing as
//! comfy-table output (or JSON for scripting), with the per-category color
//! swatches driven by the shared palette assignments.

use anyhow::{bail, Context, Result};
use calstats_core::models::event::EventBatch;
use calstats_core::models::interval::{Interval, IntervalMode};
use calstats_core::palette;
use calstats_core::stats::CategoryStat;
use calstats_core::{format_duration, UNKNOWN_CATEGORY};
use chrono::{DateTime, Local};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use std::collections::HashMap;

// ============================================================================
// Argument parsing
// ============================================================================

/// Parse the `--range` argument
pub fn parse_range(s: &str) -> Result<IntervalMode> {
    match s {
        "day" => Ok(IntervalMode::Day),
        "week" => Ok(IntervalMode::Week),
        "month" => Ok(IntervalMode::Month),
        "year" => Ok(IntervalMode::Year),
        "3m" => Ok(IntervalMode::LastMonths(3)),
        "6m" => Ok(IntervalMode::LastMonths(6)),
        "custom" => Ok(IntervalMode::Custom),
        other => bail!("unsupported range '{other}' (expected day|week|month|year|3m|6m|custom)"),
    }
}

/// Parse an RFC 3339 `--from`/`--to` bound into the local zone
pub fn parse_bound(s: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .with_context(|| format!("invalid datetime '{s}' (expected RFC 3339)"))
}

// ============================================================================
// Formatters
// ============================================================================

/// One line describing the resolved reporting window
pub fn format_interval_line(interval: &Interval<Local>) -> String {
    let span = format_duration(interval.seconds());
    let span = if span.is_empty() {
        "under a minute".to_string()
    } else {
        span
    };
    format!(
        "{} \u{2192} {} ({})",
        interval.start.format("%Y-%m-%d %H:%M"),
        interval.end.format("%Y-%m-%d %H:%M"),
        span
    )
}

fn format_share(proportion: f64) -> String {
    if proportion.is_nan() {
        "-".to_string()
    } else {
        format!("{:.1}%", proportion * 100.0)
    }
}

fn format_time(seconds: f64) -> String {
    let formatted = format_duration(seconds);
    if formatted.is_empty() {
        "-".to_string()
    } else {
        formatted
    }
}

/// Format category statistics as a table
pub fn format_stats_table(
    stats: &[CategoryStat],
    colors: &HashMap<String, String>,
    no_color: bool,
) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(vec!["", "Category", "Time", "Share", "Events"]);
    } else {
        table.set_header(vec![
            Cell::new(""),
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Time").fg(Color::Cyan),
            Cell::new("Share").fg(Color::Cyan),
            Cell::new("Events").fg(Color::Cyan),
        ]);
    }

    for stat in stats {
        let swatch = if no_color {
            Cell::new("")
        } else {
            match colors.get(&stat.category).and_then(|c| palette::parse_hex(c)) {
                Some((r, g, b)) => Cell::new("\u{25a0}").fg(Color::Rgb { r, g, b }),
                None => Cell::new(""),
            }
        };

        let category = if stat.disabled {
            format!("{} (disabled)", stat.category)
        } else {
            stat.category.clone()
        };
        let share = if stat.disabled {
            "-".to_string()
        } else {
            format_share(stat.proportion)
        };

        table.add_row(Row::from(vec![
            swatch,
            Cell::new(category),
            Cell::new(format_time(stat.time)),
            Cell::new(share),
            Cell::new(stat.events.len().to_string()),
        ]));
    }

    table.to_string()
}

/// Format category statistics as JSON
pub fn format_stats_json(stats: &[CategoryStat]) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| "[]".to_string())
}

/// Format the raw event listing as a table
pub fn format_events_table(batch: &EventBatch, no_color: bool) -> String {
    if batch.events.is_empty() {
        return "No events in range.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(vec!["Event", "Category", "Start", "Duration"]);
    } else {
        table.set_header(vec![
            Cell::new("Event").fg(Color::Cyan),
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Start").fg(Color::Cyan),
            Cell::new("Duration").fg(Color::Cyan),
        ]);
    }

    for event in &batch.events {
        let category = event
            .tags
            .first()
            .and_then(|&t| batch.tag_name(t))
            .unwrap_or(UNKNOWN_CATEGORY);
        let start = event
            .interval
            .and_then(|span| span.start)
            .and_then(|ts| ts.to_datetime())
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let duration = event
            .duration_secs()
            .map(format_time)
            .unwrap_or_else(|| "?".to_string());

        table.add_row(Row::from(vec![
            batch.event_name(event).to_string(),
            category.to_string(),
            start,
            duration,
        ]));
    }

    table.to_string()
}

// ============================================================================
// Tests
// ============================================================================
