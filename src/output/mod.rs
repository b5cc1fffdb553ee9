pub mod formatter;

pub use formatter::{format_day_heading, format_report, should_use_colors, NO_ACTIVITY_MESSAGE};
