use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ReportError;

/// An issue or pull request returned by a search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub url: String,            // HTML URL, the identity used in the report
    pub repo: String,           // "owner/repo" format
    pub number: u64,
    pub updated_at: DateTime<Utc>,
    pub is_pull_request: bool,
}

/// Authored pull requests come back from the same search index
pub type PrRef = ItemRef;

impl ItemRef {
    /// Return a short reference in the format "owner/repo#123"
    pub fn short_ref(&self) -> String {
        format!("{}#{}", self.repo, self.number)
    }
}

/// The two commit fields the window filter needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Login of the linked GitHub account; None when the git author is not linked
    pub author_login: Option<String>,
    pub authored_date: DateTime<Utc>,
}

// Wire shapes. Only the fields we read are declared; anything missing
// among them is a malformed response.

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub items: Vec<WireIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireIssue {
    pub html_url: String,
    pub number: u64,
    pub repository_url: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl TryFrom<WireIssue> for ItemRef {
    type Error = ReportError;

    fn try_from(issue: WireIssue) -> Result<Self, Self::Error> {
        let repo = repo_from_api_url(&issue.repository_url).ok_or_else(|| {
            ReportError::MalformedResponse {
                context: issue.html_url.clone(),
                message: format!("unrecognised repository_url {}", issue.repository_url),
            }
        })?;

        Ok(ItemRef {
            url: issue.html_url,
            repo,
            number: issue.number,
            updated_at: issue.updated_at,
            is_pull_request: issue.pull_request.is_some(),
        })
    }
}

/// Extract "owner/repo" from ".../repos/owner/repo"
fn repo_from_api_url(url: &str) -> Option<String> {
    let (_, tail) = url.rsplit_once("/repos/")?;
    let parts: Vec<&str> = tail.split('/').filter(|s| !s.is_empty()).collect();
    match parts.as_slice() {
        [owner, repo] => Some(format!("{}/{}", owner, repo)),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommit {
    pub author: Option<WireUser>,
    pub commit: WireCommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommitDetail {
    pub author: WireGitAuthor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireGitAuthor {
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub login: String,
}

impl From<WireCommit> for Commit {
    fn from(commit: WireCommit) -> Self {
        Commit {
            author_login: commit.author.map(|user| user.login),
            authored_date: commit.commit.author.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitResources {
    pub core: RateLimitBucket,
    pub search: RateLimitBucket,
}

/// Remaining budget for one API category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitBucket {
    pub limit: u32,
    pub remaining: u32,
}
