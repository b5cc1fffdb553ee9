use async_trait::async_trait;
use chrono::NaiveDate;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::form_urlencoded;

use crate::credentials::TOKEN_HINT;
use crate::error::ReportError;
use crate::github::api::ActivityApi;
use crate::github::error_mapping::{map_decode_error, map_http_error, map_octocrab_error};
use crate::github::types::{
    Commit, ItemRef, PrRef, RateLimitBucket, RateLimitResponse, SearchResponse, WireCommit,
};

/// Largest page GitHub serves; one page per request, no pagination
const PAGE_SIZE: &str = "100";

/// Abort before searching when fewer search requests than this remain
pub const MIN_SEARCH_BUDGET: u32 = 15;

/// Search qualifier for pull requests authored by `username`
pub fn authored_prs_query(username: &str, since: NaiveDate) -> String {
    format!("is:pr author:{} updated:>={}", username, since.format("%Y-%m-%d"))
}

/// Search qualifiers for issues and for pull requests `username` commented on.
///
/// GitHub's issue search wants an `is:issue` or `is:pr` qualifier, so the
/// commented items are fetched as two searches and concatenated.
pub fn commented_items_queries(username: &str, since: NaiveDate) -> [String; 2] {
    let since = since.format("%Y-%m-%d");
    [
        format!("is:issue commenter:{} updated:>={}", username, since),
        format!("is:pr commenter:{} updated:>={}", username, since),
    ]
}

/// Core and search budgets reported by `/rate_limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub core: RateLimitBucket,
    pub search: RateLimitBucket,
}

/// `ActivityApi` backed by the GitHub REST API through octocrab.
///
/// Every request goes through `get_json`, which counts it, maps non-2xx
/// responses by status code and decodes the body into the wire types.
pub struct OctocrabActivityApi {
    client: Octocrab,
    requests: AtomicUsize,
}

impl OctocrabActivityApi {
    pub fn new(client: Octocrab) -> Self {
        Self {
            client,
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of API requests issued so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    async fn get_json<T>(
        &self,
        operation: &str,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ReportError>
    where
        T: DeserializeOwned,
    {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let uri = if params.is_empty() {
            route.to_string()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            format!("{}?{}", route, query)
        };
        log::debug!("GET {} ({})", uri, operation);

        let response = self
            .client
            ._get(uri)
            .await
            .map_err(|e| map_octocrab_error(operation, &e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|e| map_octocrab_error(operation, &e))?;

        if !status.is_success() {
            return Err(map_http_error(operation, status, &headers, &body));
        }

        serde_json::from_str(&body).map_err(|e| map_decode_error(operation, &e))
    }

    async fn search(&self, operation: &str, query: &str) -> Result<Vec<ItemRef>, ReportError> {
        log::debug!("Searching: {}", query);
        let params = [
            ("q", query),
            ("per_page", PAGE_SIZE),
            ("sort", "updated"),
            ("order", "desc"),
        ];

        let response: SearchResponse = self.get_json(operation, "/search/issues", &params).await?;

        response.items.into_iter().map(ItemRef::try_from).collect()
    }

    /// Validate the token and check there is enough search budget left.
    ///
    /// Runs before any search so a bad token or an exhausted quota fails
    /// with a clear message instead of halfway through the queries.
    pub async fn preflight(&self) -> Result<RateLimitStatus, ReportError> {
        let _user: serde_json::Value = self
            .get_json("validate credentials", "/user", &[])
            .await
            .map_err(|e| match e {
                ReportError::Authentication { status, message } => ReportError::Authentication {
                    status,
                    message: format!(
                        "{message}\n\nThe token is invalid or has expired.\n{TOKEN_HINT}"
                    ),
                },
                other => other,
            })?;

        let limits: RateLimitResponse = self
            .get_json("read rate limit", "/rate_limit", &[])
            .await?;

        let status = RateLimitStatus {
            core: limits.resources.core,
            search: limits.resources.search,
        };
        check_search_budget(&status)?;
        Ok(status)
    }
}

/// All top-level searches must fit in the remaining search budget
pub fn check_search_budget(status: &RateLimitStatus) -> Result<(), ReportError> {
    if status.search.remaining < MIN_SEARCH_BUDGET {
        return Err(ReportError::InsufficientBudget {
            remaining: status.search.remaining,
            required: MIN_SEARCH_BUDGET,
        });
    }
    Ok(())
}

#[async_trait]
impl ActivityApi for OctocrabActivityApi {
    async fn search_authored_prs(
        &self,
        username: &str,
        since: NaiveDate,
    ) -> Result<Vec<PrRef>, ReportError> {
        let query = authored_prs_query(username, since);
        let items = self.search("search authored pull requests", &query).await?;
        // `is:pr` already restricts the index; drop anything that slipped through
        Ok(items.into_iter().filter(|item| item.is_pull_request).collect())
    }

    async fn search_commented_items(
        &self,
        username: &str,
        since: NaiveDate,
    ) -> Result<Vec<ItemRef>, ReportError> {
        let mut items = Vec::new();
        for query in commented_items_queries(username, since) {
            items.extend(self.search("search commented items", &query).await?);
        }
        Ok(items)
    }

    async fn pull_request_commits(&self, pr: &PrRef) -> Result<Vec<Commit>, ReportError> {
        let route = format!("/repos/{}/pulls/{}/commits", pr.repo, pr.number);
        let operation = format!("list commits for {}", pr.short_ref());
        let commits: Vec<WireCommit> = self
            .get_json(&operation, &route, &[("per_page", PAGE_SIZE)])
            .await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }
}
