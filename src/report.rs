//! The recap pipeline: two searches, commit filtering, bucketing by day.
//!
//! Nothing here prints. A failure anywhere aborts with the error and no
//! partial result, so a report that reaches stdout is always complete.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::activity::{
    bucket, latest_commit_in_window, ActivityEvent, DayBucket, EventKind, TimeWindow,
};
use crate::credentials::Credentials;
use crate::error::ReportError;
use crate::github::{ActivityApi, Commit, ItemRef, PrRef};

/// Commit fetches allowed in flight at once
pub const MAX_CONCURRENT_COMMIT_FETCHES: usize = 10;

/// Pull requests authored by `username` and updated since the window opened
pub async fn find_authored_prs<A>(
    api: &A,
    username: &str,
    window: &TimeWindow,
) -> Result<Vec<PrRef>, ReportError>
where
    A: ActivityApi + ?Sized,
{
    api.search_authored_prs(username, window.start_date()).await
}

/// Issues and pull requests `username` commented on since the window opened
pub async fn find_commented_items<A>(
    api: &A,
    username: &str,
    window: &TimeWindow,
) -> Result<Vec<ItemRef>, ReportError>
where
    A: ActivityApi + ?Sized,
{
    api.search_commented_items(username, window.start_date()).await
}

/// One event per commented item, on the day it was last updated.
///
/// The search qualifier only has day precision, so items updated before
/// the window opened are dropped here.
pub fn commented_events(items: &[ItemRef], window: &TimeWindow) -> Vec<ActivityEvent> {
    items
        .iter()
        .filter(|item| window.contains(item.updated_at))
        .map(|item| ActivityEvent::new(item.url.clone(), item.updated_at, EventKind::Commented))
        .collect()
}

async fn fetch_commits<'a, A>(
    api: &A,
    pr: &'a PrRef,
) -> Result<(&'a PrRef, Vec<Commit>), ReportError>
where
    A: ActivityApi + ?Sized,
{
    log::debug!("Fetching commits for {}", pr.short_ref());
    let commits = api.pull_request_commits(pr).await?;
    Ok((pr, commits))
}

/// One event per pull request with at least one commit by `username`
/// inside the window, dated by the most recent such commit.
///
/// Fetches run with bounded concurrency. The first failed fetch aborts
/// the whole collection; outstanding fetches are dropped with it.
pub async fn commit_events<A>(
    api: &A,
    prs: &[PrRef],
    username: &str,
    window: &TimeWindow,
) -> Result<Vec<ActivityEvent>, ReportError>
where
    A: ActivityApi + ?Sized,
{
    let mut pending = prs.iter();
    let mut in_flight = FuturesUnordered::new();
    let mut events = Vec::new();

    for pr in pending.by_ref().take(MAX_CONCURRENT_COMMIT_FETCHES) {
        in_flight.push(fetch_commits(api, pr));
    }

    while let Some(result) = in_flight.next().await {
        let (pr, commits) = result?;

        match latest_commit_in_window(&commits, username, window) {
            Some(at) => events.push(ActivityEvent::new(
                pr.url.clone(),
                at,
                EventKind::AuthoredCommit,
            )),
            None => log::debug!("No commits by {} in window for {}", username, pr.short_ref()),
        }

        if let Some(next) = pending.next() {
            in_flight.push(fetch_commits(api, next));
        }
    }

    Ok(events)
}

/// Run both searches, filter commits, and bucket everything by day.
pub async fn collect_activity<A>(
    api: &A,
    credentials: &Credentials,
    window: &TimeWindow,
) -> Result<DayBucket, ReportError>
where
    A: ActivityApi + ?Sized,
{
    let username = credentials.username.as_str();

    let authored = find_authored_prs(api, username, window).await?;
    log::info!(
        "Found {} authored PRs updated since {}",
        authored.len(),
        window.start_date()
    );

    let commented = find_commented_items(api, username, window).await?;
    log::info!(
        "Found {} commented items updated since {}",
        commented.len(),
        window.start_date()
    );

    let mut events = commit_events(api, &authored, username, window).await?;
    log::info!("{} authored PRs have commits in the window", events.len());

    events.extend(commented_events(&commented, window));

    Ok(bucket(events))
}
