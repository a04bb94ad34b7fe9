//! Calendar buckets for the `dateFilter` parameter.
//!
//! Boundaries are computed in the caller's calendar offset and converted to
//! UTC instants. Weeks start on Sunday: `this-week` runs from midnight today
//! through midnight of `today + (7 - days_since_sunday)`, inclusive, so on a
//! Sunday the window covers a full seven days and on a Saturday only one.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    ThisWeek,
    ThisMonth,
}

impl DateBucket {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "today" => Some(DateBucket::Today),
            "this-week" => Some(DateBucket::ThisWeek),
            "this-month" => Some(DateBucket::ThisMonth),
            _ => None,
        }
    }

    /// Start-date window for this bucket relative to `now`. `None` only when
    /// the boundaries fall outside the representable calendar.
    pub fn window(&self, now: DateTime<FixedOffset>) -> Option<DateWindow> {
        let offset = *now.offset();
        let today = now.date_naive();

        let (start, end, end_inclusive) = match self {
            DateBucket::Today => (today, today.checked_add_days(Days::new(1))?, false),
            DateBucket::ThisWeek => {
                let remaining = 7 - u64::from(today.weekday().num_days_from_sunday());
                (today, today.checked_add_days(Days::new(remaining))?, true)
            }
            DateBucket::ThisMonth => {
                let first = today.with_day(1)?;
                (first, first.checked_add_months(Months::new(1))?, false)
            }
        };

        Some(DateWindow {
            start: local_midnight(start, offset)?,
            end: local_midnight(end, offset)?,
            end_inclusive,
        })
    }
}

/// Half-open `[start, end)` or closed `[start, end]` range over `startDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_inclusive: bool,
}

impl DateWindow {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        if *instant < self.start {
            return false;
        }
        if self.end_inclusive {
            *instant <= self.end
        } else {
            *instant < self.end
        }
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        at(rfc3339).with_timezone(&Utc)
    }

    #[test]
    fn test_today_is_half_open_day() {
        let window = DateBucket::Today
            .window(at("2026-10-15T14:20:00+00:00"))
            .unwrap();

        assert_eq!(window.start, utc("2026-10-15T00:00:00Z"));
        assert_eq!(window.end, utc("2026-10-16T00:00:00Z"));
        assert!(!window.end_inclusive);
        assert!(window.contains(&utc("2026-10-15T23:59:59Z")));
        assert!(!window.contains(&utc("2026-10-16T00:00:00Z")));
        assert!(!window.contains(&utc("2026-10-14T23:59:59Z")));
    }

    #[test]
    fn test_this_week_on_a_thursday_runs_to_sunday_midnight() {
        // 2026-10-15 is a Thursday.
        let window = DateBucket::ThisWeek
            .window(at("2026-10-15T09:00:00+00:00"))
            .unwrap();

        assert_eq!(window.start, utc("2026-10-15T00:00:00Z"));
        assert_eq!(window.end, utc("2026-10-18T00:00:00Z"));
        assert!(window.end_inclusive);
        assert!(window.contains(&utc("2026-10-18T00:00:00Z")));
        assert!(!window.contains(&utc("2026-10-18T00:00:01Z")));
    }

    #[test]
    fn test_this_week_on_sunday_spans_seven_days() {
        let window = DateBucket::ThisWeek
            .window(at("2026-10-18T12:00:00+00:00"))
            .unwrap();

        assert_eq!(window.start, utc("2026-10-18T00:00:00Z"));
        assert_eq!(window.end, utc("2026-10-25T00:00:00Z"));
    }

    #[test]
    fn test_this_week_on_saturday_spans_one_day() {
        let window = DateBucket::ThisWeek
            .window(at("2026-10-17T23:00:00+00:00"))
            .unwrap();

        assert_eq!(window.start, utc("2026-10-17T00:00:00Z"));
        assert_eq!(window.end, utc("2026-10-18T00:00:00Z"));
    }

    #[test]
    fn test_this_month_wraps_into_next_year() {
        let window = DateBucket::ThisMonth
            .window(at("2026-12-20T08:00:00+00:00"))
            .unwrap();

        assert_eq!(window.start, utc("2026-12-01T00:00:00Z"));
        assert_eq!(window.end, utc("2027-01-01T00:00:00Z"));
        assert!(!window.end_inclusive);
    }

    #[test]
    fn test_boundaries_follow_calendar_offset() {
        // Still the 15th locally, even though it is the 14th in UTC.
        let window = DateBucket::Today
            .window(at("2026-10-15T01:30:00+05:30"))
            .unwrap();

        assert_eq!(window.start, utc("2026-10-14T18:30:00Z"));
        assert_eq!(window.end, utc("2026-10-15T18:30:00Z"));
    }

    #[test]
    fn test_unknown_bucket_is_not_recognised() {
        assert_eq!(DateBucket::from_param("next-year"), None);
        assert_eq!(DateBucket::from_param("today"), Some(DateBucket::Today));
    }
}
