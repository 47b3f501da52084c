//! Data models for calstats-core

pub mod event;
pub mod interval;

pub use event::{CalendarInfo, Event, EventBatch, EventDuration, TimeSpan, Timestamp};
pub use interval::{Interval, IntervalMode};
