//! Reporting-interval resolver
//!
//! Turns an [`IntervalMode`] and the current moment into concrete bounds in
//! the viewer's time zone. Calendar units (weeks, months, years) use
//! chrono's calendar-aware arithmetic so variable month lengths and DST
//! transitions resolve correctly; fixed offsets are only used for the
//! end-of-day padding.
//!
//! Conventions: weeks start on Monday and span 7 calendar days minus one
//! nanosecond; months and years end on the exclusive calendar boundary.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, TimeZone};

use crate::models::interval::{Interval, IntervalMode};

/// Resolve `mode` against `now` into concrete bounds.
///
/// Never fails: missing or invalid `custom` bounds fall back to a default
/// window of one week either side of `now`, and unrepresentable calendar
/// edges degrade to an empty interval at `now`.
pub fn resolve<Tz: TimeZone>(
    mode: IntervalMode,
    now: &DateTime<Tz>,
    custom: Option<&Interval<Tz>>,
) -> Interval<Tz> {
    if let IntervalMode::Custom = mode {
        return match custom {
            Some(bounds) if bounds.is_valid() => bounds.clone(),
            _ => {
                tracing::debug!("custom bounds missing or invalid, using default window");
                default_custom_window(now)
            }
        };
    }

    computed_bounds(mode, now).unwrap_or_else(|| {
        tracing::warn!(mode = %mode, "calendar arithmetic out of range, using empty interval");
        Interval::new(now.clone(), now.clone())
    })
}

/// Default window for absent custom bounds: one week either side of `now`
pub fn default_custom_window<Tz: TimeZone>(now: &DateTime<Tz>) -> Interval<Tz> {
    let start = now
        .clone()
        .checked_sub_days(Days::new(7))
        .unwrap_or_else(|| now.clone());
    let end = now
        .clone()
        .checked_add_days(Days::new(7))
        .unwrap_or_else(|| now.clone());
    Interval::new(start, end)
}

fn computed_bounds<Tz: TimeZone>(mode: IntervalMode, now: &DateTime<Tz>) -> Option<Interval<Tz>> {
    let tz = now.timezone();
    match mode {
        IntervalMode::Day => {
            let start = local_midnight(&tz, now.date_naive())?;
            let end = start.clone() + end_of_day();
            Some(Interval::new(start, end))
        }
        IntervalMode::Week => {
            let monday = now
                .date_naive()
                .checked_sub_days(Days::new(now.weekday().num_days_from_monday() as u64))?;
            let start = local_midnight(&tz, monday)?;
            let end = start.clone().checked_add_days(Days::new(7))? - TimeDelta::nanoseconds(1);
            Some(Interval::new(start, end))
        }
        IntervalMode::Month => {
            let first = now.date_naive().with_day(1)?;
            let start = local_midnight(&tz, first)?;
            let end = start.clone().checked_add_months(Months::new(1))?;
            Some(Interval::new(start, end))
        }
        IntervalMode::Year => {
            let jan1 = NaiveDate::from_ymd_opt(now.year(), 1, 1)?;
            let start = local_midnight(&tz, jan1)?;
            let end = start.clone().checked_add_months(Months::new(12))?;
            Some(Interval::new(start, end))
        }
        IntervalMode::LastMonths(n) => {
            let start = now.clone().checked_sub_months(Months::new(n))?;
            Some(Interval::new(start, now.clone()))
        }
        IntervalMode::Custom => unreachable!("handled by resolve"),
    }
}

/// Midnight of `date` in `tz`. Some zones skip midnight on DST days; roll
/// forward to the first representable hour when that happens.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    (0..4).find_map(|hour| {
        date.and_hms_opt(hour, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
    })
}

/// Inclusive end-of-day padding: 23h 59m 59.999999999s
fn end_of_day() -> TimeDelta {
    TimeDelta::days(1) - TimeDelta::nanoseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_day_bounds() {
        let now = at(2026, 3, 14, 15, 30, 45);
        let interval = resolve(IntervalMode::Day, &now, None);
        assert_eq!(interval.start, at(2026, 3, 14, 0, 0, 0));
        assert_eq!(
            interval.end,
            at(2026, 3, 15, 0, 0, 0) - TimeDelta::nanoseconds(1)
        );
    }

    #[test]
    fn test_week_starts_monday() {
        // 2026-03-14 is a Saturday
        let now = at(2026, 3, 14, 15, 30, 45);
        let interval = resolve(IntervalMode::Week, &now, None);
        assert_eq!(interval.start, at(2026, 3, 9, 0, 0, 0));
        assert_eq!(
            interval.end,
            at(2026, 3, 16, 0, 0, 0) - TimeDelta::nanoseconds(1)
        );
    }

    #[test]
    fn test_week_on_monday_keeps_current_week() {
        let now = at(2026, 3, 9, 0, 0, 0);
        let interval = resolve(IntervalMode::Week, &now, None);
        assert_eq!(interval.start, now);
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let now = at(2024, 2, 15, 10, 0, 0);
        let interval = resolve(IntervalMode::Month, &now, None);
        assert_eq!(interval.start, at(2024, 2, 1, 0, 0, 0));
        assert_eq!(interval.end, at(2024, 3, 1, 0, 0, 0));
        assert_eq!(interval.duration().num_days(), 29);
    }

    #[test]
    fn test_year_bounds() {
        let now = at(2026, 7, 4, 12, 0, 0);
        let interval = resolve(IntervalMode::Year, &now, None);
        assert_eq!(interval.start, at(2026, 1, 1, 0, 0, 0));
        assert_eq!(interval.end, at(2027, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_last_months_preserves_time_of_day() {
        let now = at(2026, 3, 31, 12, 34, 56);
        let interval = resolve(IntervalMode::LastMonths(3), &now, None);
        assert_eq!(interval.start, at(2025, 12, 31, 12, 34, 56));
        assert_eq!(interval.end, now);
    }

    #[test]
    fn test_last_months_clamps_short_target_month() {
        // May 31 minus 3 calendar months has no Feb 31; chrono clamps
        let now = at(2026, 5, 31, 8, 0, 0);
        let interval = resolve(IntervalMode::LastMonths(3), &now, None);
        assert_eq!(interval.start, at(2026, 2, 28, 8, 0, 0));
    }

    #[test]
    fn test_custom_bounds_verbatim() {
        let now = at(2026, 3, 14, 12, 0, 0);
        let bounds = Interval::new(at(2026, 1, 5, 6, 7, 8), at(2026, 2, 3, 4, 5, 6));
        let interval = resolve(IntervalMode::Custom, &now, Some(&bounds));
        assert_eq!(interval, bounds);
    }

    #[test]
    fn test_custom_missing_falls_back_to_default_window() {
        let now = at(2026, 3, 14, 12, 0, 0);
        let interval = resolve(IntervalMode::Custom, &now, None);
        assert_eq!(interval.start, at(2026, 3, 7, 12, 0, 0));
        assert_eq!(interval.end, at(2026, 3, 21, 12, 0, 0));
    }

    #[test]
    fn test_custom_inverted_falls_back_to_default_window() {
        let now = at(2026, 3, 14, 12, 0, 0);
        let inverted = Interval::new(at(2026, 2, 1, 0, 0, 0), at(2026, 1, 1, 0, 0, 0));
        let interval = resolve(IntervalMode::Custom, &now, Some(&inverted));
        assert_eq!(interval, default_custom_window(&now));
    }
}
