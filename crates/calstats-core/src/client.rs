//! Calendar service RPC client
//!
//! The service exposes Connect-style unary endpoints: a JSON POST per
//! method under `/calendar.v1.CalendarService/`. The client is a thin typed
//! wrapper; retry policy, if any, belongs to the caller.

use chrono::TimeZone;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::models::event::{CalendarInfo, EventBatch, Timestamp};
use crate::models::interval::Interval;

/// Wire shape of the Events request interval
#[derive(Debug, Serialize)]
struct TimestampInterval {
    start: Timestamp,
    end: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventsRequest<'a> {
    timezone: &'a str,
    interval: TimestampInterval,
}

/// Client for the calendar statistics service
pub struct CalendarClient {
    base_url: String,
    http: reqwest::Client,
}

impl CalendarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the events overlapping `interval`, resolved server-side in the
    /// given IANA time zone
    pub async fn events<Tz: TimeZone>(
        &self,
        timezone: &str,
        interval: &Interval<Tz>,
    ) -> CoreResult<EventBatch> {
        let request = EventsRequest {
            timezone,
            interval: TimestampInterval {
                start: Timestamp::from_datetime(&interval.start),
                end: Timestamp::from_datetime(&interval.end),
            },
        };

        let batch: EventBatch = self.unary("Events", &request).await?;
        tracing::debug!(
            events = batch.events.len(),
            tags = batch.tags.len(),
            "fetched events"
        );
        Ok(batch)
    }

    /// Fetch the server's calendar configuration
    pub async fn calendars(&self) -> CoreResult<CalendarInfo> {
        self.unary("Calendar", &serde_json::json!({})).await
    }

    async fn unary<Req, Resp>(&self, method: &str, request: &Req) -> CoreResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: serde::de::DeserializeOwned,
    {
        let url = format!("{}/calendar.v1.CalendarService/{}", self.base_url, method);
        tracing::debug!(%url, "calendar rpc");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoreError::Rpc {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Resp>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_events_request_wire_shape() {
        let start = Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
        let request = EventsRequest {
            timezone: "Europe/Paris",
            interval: TimestampInterval {
                start: Timestamp::from_datetime(&start),
                end: Timestamp::from_datetime(&end),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timezone": "Europe/Paris",
                "interval": {
                    "start": {"seconds": start.timestamp(), "nanos": 0},
                    "end": {"seconds": end.timestamp(), "nanos": 0}
                }
            })
        );
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = CalendarClient::new("http://127.0.0.1:8003/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8003");
    }
}
