use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ReportError;

use super::types::{Commit, ItemRef, PrRef};

/// The three GitHub capabilities a recap needs.
///
/// Production binds this to octocrab; tests bind it to fixed fixture data.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// Pull requests authored by `username`, updated on or after `since`
    async fn search_authored_prs(
        &self,
        username: &str,
        since: NaiveDate,
    ) -> Result<Vec<PrRef>, ReportError>;

    /// Issues and pull requests `username` commented on, updated on or after `since`
    async fn search_commented_items(
        &self,
        username: &str,
        since: NaiveDate,
    ) -> Result<Vec<ItemRef>, ReportError>;

    /// Commits attached to a pull request, in the order GitHub lists them
    async fn pull_request_commits(&self, pr: &PrRef) -> Result<Vec<Commit>, ReportError>;
}
