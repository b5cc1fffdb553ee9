use std::io::IsTerminal;

use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::activity::DayBucket;

/// Printed instead of an empty report
pub const NO_ACTIVITY_MESSAGE: &str = "No activity found in the last 7 days.";

/// Heading for one day: "# Thursday (2024-05-09)"
pub fn format_day_heading(day: NaiveDate) -> String {
    format!("# {} ({})", day.format("%A"), day.format("%Y-%m-%d"))
}

/// Format one day as a heading followed by one bullet per URL
fn format_day<'a>(
    day: NaiveDate,
    urls: impl Iterator<Item = &'a String>,
    use_colors: bool,
) -> String {
    let heading = format_day_heading(day);
    let heading = if use_colors {
        heading.bold().to_string()
    } else {
        heading
    };

    std::iter::once(heading)
        .chain(urls.map(|url| format!("- {}", url)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the whole recap, most recent day first, days separated by a
/// blank line. Days without activity are skipped.
pub fn format_report(days: &DayBucket, use_colors: bool) -> String {
    if days.is_empty() {
        return NO_ACTIVITY_MESSAGE.to_string();
    }

    days.days_descending()
        .map(|(day, urls)| format_day(day, urls.iter(), use_colors))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_format_day_heading() {
        assert_eq!(format_day_heading(date(9)), "# Thursday (2024-05-09)");
        assert_eq!(format_day_heading(date(5)), "# Sunday (2024-05-05)");
    }

    #[test]
    fn test_format_report_empty() {
        assert_eq!(format_report(&DayBucket::new(), false), NO_ACTIVITY_MESSAGE);
    }

    #[test]
    fn test_format_report_days_descending() {
        let mut days = DayBucket::new();
        days.insert(date(6), "https://github.com/o/r/pull/1");
        days.insert(date(9), "https://github.com/o/r/pull/2");
        days.insert(date(7), "https://github.com/o/r/issues/3");

        let report = format_report(&days, false);
        let headings: Vec<&str> = report.lines().filter(|l| l.starts_with('#')).collect();

        assert_eq!(
            headings,
            vec![
                "# Thursday (2024-05-09)",
                "# Tuesday (2024-05-07)",
                "# Monday (2024-05-06)",
            ]
        );
    }

    #[test]
    fn test_format_report_urls_sorted_within_day() {
        let mut days = DayBucket::new();
        days.insert(date(9), "https://github.com/o/r/pull/2");
        days.insert(date(9), "https://github.com/a/b/issues/9");
        days.insert(date(9), "https://github.com/o/r/pull/2");

        assert_eq!(
            format_report(&days, false),
            "# Thursday (2024-05-09)\n\
             - https://github.com/a/b/issues/9\n\
             - https://github.com/o/r/pull/2"
        );
    }

    #[test]
    fn test_format_report_blank_line_between_days() {
        let mut days = DayBucket::new();
        days.insert(date(8), "https://github.com/o/r/pull/1");
        days.insert(date(7), "https://github.com/o/r/pull/1");

        let report = format_report(&days, false);
        assert_eq!(report.matches("\n\n").count(), 1);
        assert!(!report.ends_with('\n'));
    }

    #[test]
    fn test_format_report_colors_only_decorate_headings() {
        let mut days = DayBucket::new();
        days.insert(date(9), "https://github.com/o/r/pull/2");

        let colored = format_report(&days, true);
        assert!(colored.contains("Thursday (2024-05-09)"));
        assert!(colored.contains("\n- https://github.com/o/r/pull/2"));
    }
}
