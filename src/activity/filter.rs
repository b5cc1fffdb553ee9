use chrono::{DateTime, Utc};

use crate::activity::types::TimeWindow;
use crate::github::types::Commit;

/// Authored date of the most recent commit by `username` inside `window`.
///
/// Commits by co-authors, bots, or git identities not linked to an account
/// never count, and neither do commits outside the window.
pub fn latest_commit_in_window(
    commits: &[Commit],
    username: &str,
    window: &TimeWindow,
) -> Option<DateTime<Utc>> {
    commits
        .iter()
        .filter(|commit| commit.author_login.as_deref() == Some(username))
        .map(|commit| commit.authored_date)
        .filter(|at| window.contains(*at))
        .max()
}
