//! calstats-core - Core library for calstats
//!
//! Provides the reporting-interval resolver, the category statistics
//! aggregator, the calendar service RPC client, and the persisted
//! preference/color utilities shared by the frontends.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod interval;
pub mod models;
pub mod palette;
pub mod preferences;
pub mod stats;

pub use client::CalendarClient;
pub use dashboard::Dashboard;
pub use error::{CoreError, CoreResult};
pub use format::format_duration;
pub use interval::resolve;
pub use models::event::{CalendarInfo, Event, EventBatch};
pub use models::interval::{Interval, IntervalMode};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use stats::{category_stats, CategoryStat, UNKNOWN_CATEGORY};
