//! Wire models for the calendar service's Events RPC
//!
//! The service speaks protobuf-style JSON: timestamps and durations are
//! `{seconds, nanos}` pairs, events reference their name and categories
//! through per-batch lookup tables to keep repeated strings off the wire.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Protobuf-style point in time: seconds since epoch plus nanosecond remainder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(default)]
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Timestamp {
    /// Build from any timezone-aware datetime (sub-second precision kept)
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }

    /// Convert back to a UTC datetime; `None` for out-of-range values
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanos.max(0) as u32)
            .single()
    }
}

/// Protobuf-style elapsed time: seconds plus nanosecond remainder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDuration {
    #[serde(default)]
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl EventDuration {
    pub fn as_secs_f64(&self) -> f64 {
        self.seconds as f64 + self.nanos as f64 * 1e-9
    }
}

/// Start/end timestamps of a single event occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub end: Option<Timestamp>,
}

/// A single calendar event as returned by the Events RPC
///
/// `name` indexes the batch's `event_names` table, `tags` index its `tags`
/// table. `duration` is required by contract; the aggregator fails fast when
/// it is missing rather than producing partial statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub name: u32,
    #[serde(default)]
    pub tags: Vec<u32>,
    #[serde(default)]
    pub interval: Option<TimeSpan>,
    #[serde(default)]
    pub duration: Option<EventDuration>,
}

impl Event {
    /// Duration in seconds, `None` when the event violates the contract
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

/// Fetch result: the event list plus the lookup tables it indexes into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBatch {
    #[serde(default)]
    pub event_names: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl EventBatch {
    /// Display name of an event, `"?"` when its name index is out of range
    pub fn event_name(&self, event: &Event) -> &str {
        self.event_names
            .get(event.name as usize)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Display name of a tag index
    pub fn tag_name(&self, tag: u32) -> Option<&str> {
        self.tags.get(tag as usize).map(String::as_str)
    }
}

/// Response of the Calendar RPC: which server and calendars feed the data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarInfo {
    #[serde(default)]
    pub calendar_server: String,
    #[serde(default)]
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let ts = Timestamp::from_datetime(&dt);
        assert_eq!(ts.seconds, dt.timestamp());
        assert_eq!(ts.nanos, 0);
        assert_eq!(ts.to_datetime(), Some(dt));
    }

    #[test]
    fn test_duration_subsecond_precision() {
        let d = EventDuration {
            seconds: 90,
            nanos: 500_000_000,
        };
        assert!((d.as_secs_f64() - 90.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_events_response() {
        let json = r#"{
            "eventNames": ["Standup", "Gym"],
            "tags": ["Work", "Health"],
            "events": [
                {
                    "name": 0,
                    "tags": [0],
                    "interval": {
                        "start": {"seconds": 1767225600},
                        "end": {"seconds": 1767226500}
                    },
                    "duration": {"seconds": 900}
                },
                {
                    "name": 1,
                    "tags": [1],
                    "duration": {"seconds": 3600, "nanos": 0}
                },
                {
                    "name": 1,
                    "duration": {"seconds": 60}
                }
            ]
        }"#;

        let batch: EventBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.tags, vec!["Work", "Health"]);
        assert_eq!(batch.events.len(), 3);
        assert_eq!(batch.event_name(&batch.events[0]), "Standup");
        assert_eq!(batch.events[0].duration_secs(), Some(900.0));
        // third event carries no tags at all
        assert!(batch.events[2].tags.is_empty());
    }

    #[test]
    fn test_event_name_out_of_range() {
        let batch = EventBatch {
            event_names: vec!["Standup".to_string()],
            ..Default::default()
        };
        let event = Event {
            name: 7,
            ..Default::default()
        };
        assert_eq!(batch.event_name(&event), "?");
    }

    #[test]
    fn test_parse_calendar_response() {
        let json = r#"{"calendarServer": "https://dav.example.net", "names": ["personal", "work"]}"#;
        let info: CalendarInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.calendar_server, "https://dav.example.net");
        assert_eq!(info.names.len(), 2);
    }
}
