pub mod bucket;
pub mod filter;
pub mod types;

pub use bucket::bucket;
pub use filter::latest_commit_in_window;
pub use types::{ActivityEvent, DayBucket, EventKind, TimeWindow, WINDOW_DAYS};
