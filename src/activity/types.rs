use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Length of the trailing window, in days
pub const WINDOW_DAYS: i64 = 7;

/// The trailing interval every event is checked against.
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `WINDOW_DAYS` ending at `now`
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(WINDOW_DAYS),
            end: now,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Calendar date used for the `updated:>=` search qualifier
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AuthoredCommit,
    Commented,
}

/// One unit of activity on one item, pinned to a UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub url: String,
    pub day: NaiveDate,
    pub kind: EventKind,
}

impl ActivityEvent {
    pub fn new(url: impl Into<String>, at: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            url: url.into(),
            day: at.date_naive(),
            kind,
        }
    }
}

/// Day -> unique URLs touched that day.
/// Ordered maps keep iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBucket {
    days: BTreeMap<NaiveDate, BTreeSet<String>>,
}

impl DayBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the URL was already recorded for that day
    pub fn insert(&mut self, day: NaiveDate, url: impl Into<String>) -> bool {
        self.days.entry(day).or_default().insert(url.into())
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeSet::is_empty)
    }

    pub fn urls(&self, day: NaiveDate) -> Option<&BTreeSet<String>> {
        self.days.get(&day)
    }

    /// Non-empty days, most recent first
    pub fn days_descending(&self) -> impl Iterator<Item = (NaiveDate, &BTreeSet<String>)> {
        self.days
            .iter()
            .rev()
            .filter(|(_, urls)| !urls.is_empty())
            .map(|(day, urls)| (*day, urls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_window_spans_seven_days() {
        let window = TimeWindow::ending_at(now());
        assert_eq!(window.end - window.start, Duration::days(7));
        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn test_window_is_inclusive_at_both_ends() {
        let window = TimeWindow::ending_at(now());
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::seconds(1)));
        assert!(!window.contains(window.end + Duration::seconds(1)));
    }

    #[test]
    fn test_event_day_is_utc_date() {
        let at = Utc.with_ymd_and_hms(2024, 5, 9, 23, 59, 59).unwrap();
        let event = ActivityEvent::new("https://github.com/o/r/pull/1", at, EventKind::Commented);
        assert_eq!(event.day, NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
    }

    #[test]
    fn test_day_bucket_iterates_most_recent_first() {
        let mut bucket = DayBucket::new();
        let mon = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let wed = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
        bucket.insert(mon, "a");
        bucket.insert(wed, "b");

        let days: Vec<NaiveDate> = bucket.days_descending().map(|(d, _)| d).collect();
        assert_eq!(days, vec![wed, mon]);
    }

    #[test]
    fn test_day_bucket_rejects_duplicate_url_on_same_day() {
        let mut bucket = DayBucket::new();
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert!(bucket.insert(day, "a"));
        assert!(!bucket.insert(day, "a"));
        assert_eq!(bucket.urls(day).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_bucket() {
        assert!(DayBucket::new().is_empty());
    }
}
