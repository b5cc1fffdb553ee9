use crate::activity::types::{ActivityEvent, DayBucket};

/// Group events by day. A URL appears at most once per day, but once in
/// every day it had activity.
pub fn bucket<I>(events: I) -> DayBucket
where
    I: IntoIterator<Item = ActivityEvent>,
{
    let mut days = DayBucket::new();
    for event in events {
        days.insert(event.day, event.url);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::types::EventKind;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_same_url_same_day_collapses() {
        let url = "https://github.com/owner/repo/pull/1";
        let days = bucket(vec![
            ActivityEvent::new(url, at(9, 8), EventKind::AuthoredCommit),
            ActivityEvent::new(url, at(9, 17), EventKind::Commented),
        ]);

        let thursday = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(days.urls(thursday).unwrap().len(), 1);
        assert_eq!(days.days_descending().count(), 1);
    }

    #[test]
    fn test_same_url_different_days_appears_under_each() {
        let url = "https://github.com/owner/repo/pull/1";
        let days = bucket(vec![
            ActivityEvent::new(url, at(6, 8), EventKind::AuthoredCommit),
            ActivityEvent::new(url, at(7, 8), EventKind::Commented),
        ]);

        let listed: Vec<_> = days.days_descending().map(|(d, urls)| (d, urls.len())).collect();
        assert_eq!(
            listed,
            vec![
                (NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(), 1),
                (NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), 1),
            ]
        );
    }

    #[test]
    fn test_no_events_gives_empty_bucket() {
        assert!(bucket(Vec::new()).is_empty());
    }
}
