//! Per-category time statistics
//!
//! Aggregates a fetched event batch over a reporting interval into ranked
//! per-category totals. Untagged events and the interval's untracked time
//! land in a synthetic "Unknown" bucket appended after the batch's real
//! tags. Disabled categories keep their events out of the ranking and out
//! of the proportion denominator, so the proportions of the remaining
//! categories still sum to 1.

use chrono::TimeZone;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::models::event::{Event, EventBatch};
use crate::models::interval::Interval;

/// Name of the synthetic fallback bucket. The service guarantees no real
/// category uses this name.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Aggregate for one category over one interval
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    /// Category display name ("Unknown" for the synthetic bucket)
    pub category: String,
    /// Accumulated seconds credited to this category
    pub time: f64,
    /// Share of the enabled interval time, 0.0-1.0; NaN when the enabled
    /// denominator is empty (zero-length interval with everything disabled)
    pub proportion: f64,
    /// Contributing events, descending by duration
    pub events: Vec<Event>,
    /// Excluded from ranking credit and from the proportion denominator
    pub disabled: bool,
}

impl CategoryStat {
    fn new(category: String, disabled: bool) -> Self {
        Self {
            category,
            time: 0.0,
            proportion: 0.0,
            events: Vec::new(),
            disabled,
        }
    }
}

/// Compute ranked category statistics for `batch` over `interval`.
///
/// Pure function of its inputs. Events credit their full duration to their
/// first tag (remaining tags are ignored, a documented limitation of the
/// tagging model); untagged events credit "Unknown". Any event without a
/// duration aborts with a data-integrity error and no partial results, as
/// does a first tag that the batch's tag table does not contain.
pub fn category_stats<Tz: TimeZone>(
    interval: &Interval<Tz>,
    batch: &EventBatch,
    disabled: &[String],
) -> CoreResult<Vec<CategoryStat>> {
    let unknown_idx = batch.tags.len();
    let mut categories: Vec<CategoryStat> = batch
        .tags
        .iter()
        .cloned()
        .chain(std::iter::once(UNKNOWN_CATEGORY.to_string()))
        .map(|name| {
            let off = disabled.iter().any(|d| d == &name);
            CategoryStat::new(name, off)
        })
        .collect();

    // time spent per category; disabled buckets accumulate separately so
    // they can be excluded from the proportion denominator below
    let mut tracked_seconds = 0.0;
    let mut disabled_seconds = 0.0;
    for event in &batch.events {
        let Some(duration) = event.duration_secs() else {
            return Err(CoreError::UndefinedDuration {
                name: batch.event_name(event).to_string(),
            });
        };

        let bucket = match event.tags.first() {
            Some(&tag) if (tag as usize) < unknown_idx => tag as usize,
            Some(&tag) => {
                return Err(CoreError::UnknownTag {
                    name: batch.event_name(event).to_string(),
                    tag,
                    len: unknown_idx,
                });
            }
            None => unknown_idx,
        };

        // counted regardless of disabled state: untracked time is the part
        // of the interval no event covers at all
        tracked_seconds += duration;
        if categories[bucket].disabled {
            disabled_seconds += duration;
        } else {
            categories[bucket].time += duration;
            categories[bucket].events.push(event.clone());
        }
    }

    // time without any event on it
    let interval_seconds = interval.seconds();
    let untracked_seconds = interval_seconds - tracked_seconds;
    if categories[unknown_idx].disabled {
        disabled_seconds += untracked_seconds;
    } else {
        categories[unknown_idx].time += untracked_seconds;
    }

    let total_seconds = interval_seconds - disabled_seconds;
    for category in &mut categories {
        category.proportion = if total_seconds > 0.0 {
            category.time / total_seconds
        } else {
            f64::NAN
        };
        category.events.sort_by(|a, b| {
            let a = a.duration_secs().unwrap_or(0.0);
            let b = b.duration_secs().unwrap_or(0.0);
            b.total_cmp(&a)
        });
    }

    // stable sort: ties keep tag-table order, with Unknown last among them
    categories.sort_by(|a, b| b.time.total_cmp(&a.time));

    Ok(categories)
}
