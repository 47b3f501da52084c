//! Dashboard model
//!
//! Holds the pieces the display surface drives: the selected interval mode,
//! the custom bounds, and the last fetched batch. There is no implicit
//! reactivity; callers re-run `refresh` and `stats` whenever the interval or
//! the batch should change. Mode and bounds persist through the injected
//! preference store under the same keys the service's other frontends use.

use chrono::{DateTime, Local};

use crate::client::CalendarClient;
use crate::error::CoreResult;
use crate::interval::{default_custom_window, resolve};
use crate::models::event::EventBatch;
use crate::models::interval::{Interval, IntervalMode};
use crate::preferences::{keys, PreferenceStore};
use crate::stats::{category_stats, CategoryStat};

pub struct Dashboard<S: PreferenceStore> {
    prefs: S,
    mode: IntervalMode,
    custom_bounds: Interval<Local>,
    batch: Option<EventBatch>,
}

impl<S: PreferenceStore> Dashboard<S> {
    /// Restore mode and custom bounds from the store; unknown or unreadable
    /// values fall back to the defaults (week mode, ±7-day custom window)
    pub fn load(prefs: S) -> Self {
        let now = Local::now();
        let mode = prefs
            .get(keys::INTERVAL_OPTION)
            .and_then(|s| IntervalMode::parse(&s))
            .unwrap_or_default();

        let stored_bound = |key: &str| {
            prefs
                .get(key)?
                .parse::<DateTime<chrono::FixedOffset>>()
                .ok()
                .map(|dt| dt.with_timezone(&Local))
        };
        let fallback = default_custom_window(&now);
        let custom_bounds = Interval::new(
            stored_bound(keys::CUSTOM_START).unwrap_or(fallback.start),
            stored_bound(keys::CUSTOM_END).unwrap_or(fallback.end),
        );

        Self {
            prefs,
            mode,
            custom_bounds,
            batch: None,
        }
    }

    /// The injected store, shared with color assignment
    pub fn preferences(&self) -> &S {
        &self.prefs
    }

    pub fn mode(&self) -> IntervalMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: IntervalMode) {
        self.mode = mode;
        self.prefs.set(keys::INTERVAL_OPTION, mode.as_str());
    }

    pub fn custom_bounds(&self) -> &Interval<Local> {
        &self.custom_bounds
    }

    pub fn set_custom_bounds(&mut self, bounds: Interval<Local>) {
        self.prefs
            .set(keys::CUSTOM_START, &bounds.start.to_rfc3339());
        self.prefs.set(keys::CUSTOM_END, &bounds.end.to_rfc3339());
        self.custom_bounds = bounds;
    }

    /// The reporting window for the current mode and wall clock
    pub fn interval(&self) -> Interval<Local> {
        resolve(self.mode, &Local::now(), Some(&self.custom_bounds))
    }

    /// IANA zone id sent to the service so it resolves recurring events in
    /// the viewer's zone; "UTC" when the platform zone cannot be determined
    pub fn timezone_id() -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not determine local timezone, using UTC");
            "UTC".to_string()
        })
    }

    /// Fetch the events for the current interval and cache the batch.
    /// On failure the previous batch is kept, so the display surface can
    /// continue to show the last good statistics.
    pub async fn refresh(&mut self, client: &CalendarClient) -> CoreResult<&EventBatch> {
        let interval = self.interval();
        let timezone = Self::timezone_id();
        let batch = client.events(&timezone, &interval).await?;
        Ok(self.batch.insert(batch))
    }

    pub fn batch(&self) -> Option<&EventBatch> {
        self.batch.as_ref()
    }

    /// Recompute the ranked statistics from scratch; `None` before the
    /// first successful fetch
    pub fn stats(&self, disabled: &[String]) -> CoreResult<Option<Vec<CategoryStat>>> {
        let Some(batch) = &self.batch else {
            return Ok(None);
        };
        category_stats(&self.interval(), batch, disabled).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{Event, EventDuration};
    use crate::preferences::MemoryPreferences;
    use chrono::TimeZone;

    #[test]
    fn test_load_defaults_on_empty_store() {
        let dash = Dashboard::load(MemoryPreferences::new());
        assert_eq!(dash.mode(), IntervalMode::Week);
        // default custom window spans two weeks around now (a DST edge in
        // the local zone can shave an hour off)
        let bounds = dash.custom_bounds();
        assert!(bounds.is_valid());
        assert!((13..=14).contains(&bounds.duration().num_days()));
    }

    #[test]
    fn test_load_restores_persisted_mode() {
        let prefs = MemoryPreferences::new();
        prefs.set(keys::INTERVAL_OPTION, "LAST_6_MONTHS");
        let dash = Dashboard::load(prefs);
        assert_eq!(dash.mode(), IntervalMode::LastMonths(6));
    }

    #[test]
    fn test_load_ignores_unknown_mode() {
        let prefs = MemoryPreferences::new();
        prefs.set(keys::INTERVAL_OPTION, "THIS_DECADE");
        let dash = Dashboard::load(prefs);
        assert_eq!(dash.mode(), IntervalMode::Week);
    }

    #[test]
    fn test_set_mode_persists() {
        let mut dash = Dashboard::load(MemoryPreferences::new());
        dash.set_mode(IntervalMode::Month);
        assert_eq!(
            dash.prefs.get(keys::INTERVAL_OPTION),
            Some("THIS_MONTH".to_string())
        );
    }

    #[test]
    fn test_custom_bounds_roundtrip_through_store() {
        let start = Local.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2026, 1, 12, 8, 0, 0).unwrap();

        let mut dash = Dashboard::load(MemoryPreferences::new());
        dash.set_custom_bounds(Interval::new(start, end));
        let prefs = dash.prefs;

        let reloaded = Dashboard::load(prefs);
        assert_eq!(reloaded.custom_bounds().start.timestamp(), start.timestamp());
        assert_eq!(reloaded.custom_bounds().end.timestamp(), end.timestamp());
    }

    #[test]
    fn test_load_ignores_corrupt_custom_bounds() {
        let prefs = MemoryPreferences::new();
        prefs.set(keys::CUSTOM_START, "not a datetime");
        prefs.set(keys::CUSTOM_END, "also wrong");
        let dash = Dashboard::load(prefs);
        assert!(dash.custom_bounds().is_valid());
        assert!((13..=14).contains(&dash.custom_bounds().duration().num_days()));
    }

    #[test]
    fn test_stats_none_before_fetch() {
        let dash = Dashboard::load(MemoryPreferences::new());
        assert!(dash.stats(&[]).unwrap().is_none());
    }

    #[test]
    fn test_stats_recomputes_from_cached_batch() {
        let mut dash = Dashboard::load(MemoryPreferences::new());
        dash.batch = Some(EventBatch {
            event_names: vec!["Standup".to_string()],
            tags: vec!["Work".to_string()],
            events: vec![Event {
                name: 0,
                tags: vec![0],
                interval: None,
                duration: Some(EventDuration {
                    seconds: 900,
                    nanos: 0,
                }),
            }],
        });

        let stats = dash.stats(&[]).unwrap().unwrap();
        assert_eq!(stats.len(), 2);
        let work = stats.iter().find(|s| s.category == "Work").unwrap();
        assert_eq!(work.time, 900.0);
    }
}
