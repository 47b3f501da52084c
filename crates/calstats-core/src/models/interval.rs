//! Reporting interval and its selection modes

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete reporting window: a pair of timezone-aware timestamps,
/// `start <= end`. Immutable once resolved; rolling modes recompute a fresh
/// interval from the current wall clock instead of mutating an old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<Tz: TimeZone = Local> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> Interval<Tz> {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// Signed distance from start to end
    pub fn duration(&self) -> chrono::TimeDelta {
        self.end.clone().signed_duration_since(self.start.clone())
    }

    /// Interval length in seconds at full sub-second precision
    pub fn seconds(&self) -> f64 {
        let d = self.duration();
        d.num_seconds() as f64 + d.subsec_nanos() as f64 * 1e-9
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// Interval selection strategy
///
/// All modes except `Custom` are pure functions of "now" in the viewer's
/// time zone; `Custom` uses user-supplied bounds carried alongside the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntervalMode {
    Day,
    #[default]
    Week,
    Month,
    Year,
    /// Rolling window ending at "now"; only 3 and 6 are offered by the UI
    LastMonths(u32),
    Custom,
}

impl IntervalMode {
    /// Persisted wire string, shared with the other frontends of the service
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalMode::Day => "THIS_DAY",
            IntervalMode::Week => "THIS_WEEK",
            IntervalMode::Month => "THIS_MONTH",
            IntervalMode::Year => "THIS_YEAR",
            IntervalMode::LastMonths(3) => "LAST_3_MONTHS",
            IntervalMode::LastMonths(6) => "LAST_6_MONTHS",
            IntervalMode::LastMonths(_) => "LAST_MONTHS",
            IntervalMode::Custom => "CUSTOM",
        }
    }

    /// Parse a persisted wire string; unknown values mean a stale or foreign
    /// preference file and yield `None` (callers fall back to the default)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "THIS_DAY" => Some(IntervalMode::Day),
            "THIS_WEEK" => Some(IntervalMode::Week),
            "THIS_MONTH" => Some(IntervalMode::Month),
            "THIS_YEAR" => Some(IntervalMode::Year),
            "LAST_3_MONTHS" => Some(IntervalMode::LastMonths(3)),
            "LAST_6_MONTHS" => Some(IntervalMode::LastMonths(6)),
            "CUSTOM" => Some(IntervalMode::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
