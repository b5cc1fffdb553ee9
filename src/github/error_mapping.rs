//! Translation of GitHub failures into `ReportError`.

use http::{HeaderMap, StatusCode};
use serde::Deserialize;

use crate::error::ReportError;

/// Longest slice of a non-JSON error body kept in the message
const MAX_BODY_EXCERPT: usize = 200;

/// GitHub's JSON error envelope
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
    #[serde(default)]
    documentation_url: Option<String>,
}

/// Rate limiting is 429, or 403 when GitHub says it is about the quota.
/// A plain 403 is a permissions problem and stays an API error.
pub(crate) fn is_rate_limit_response(
    status: StatusCode,
    headers: &HeaderMap,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    if status != StatusCode::FORBIDDEN {
        return false;
    }

    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    quota_exhausted
        || message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"))
}

/// Message for a failed response: GitHub's `message` when the body is its
/// JSON envelope, otherwise a trimmed excerpt of the raw body, otherwise
/// the status reason.
fn error_message(status: StatusCode, body: &str) -> (String, Option<String>) {
    if let Ok(parsed) = serde_json::from_str::<GitHubErrorBody>(body) {
        return (parsed.message, parsed.documentation_url);
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        let reason = status.canonical_reason().unwrap_or("no response body");
        return (reason.to_string(), None);
    }

    let excerpt: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
    if excerpt.len() < trimmed.len() {
        (format!("{excerpt}..."), None)
    } else {
        (excerpt, None)
    }
}

/// Map a non-2xx response, whatever its body, to an error carrying the status.
pub(crate) fn map_http_error(
    operation: &str,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> ReportError {
    let (message, documentation_url) = error_message(status, body);
    let code = status.as_u16();

    if is_rate_limit_response(status, headers, &message, documentation_url.as_deref()) {
        ReportError::RateLimited {
            status: code,
            message,
        }
    } else if status == StatusCode::UNAUTHORIZED {
        ReportError::Authentication {
            status: code,
            message,
        }
    } else {
        ReportError::Api {
            status: code,
            message: format!("{operation} failed: {message}"),
        }
    }
}

/// Display an octocrab error without the backtrace its own Display appends.
fn describe_octocrab_error(error: &octocrab::Error) -> String {
    if let Some(source) = std::error::Error::source(error) {
        return source.to_string();
    }

    let text = error.to_string();
    match text.find("Found at") {
        Some(idx) => text[..idx].trim_end().to_string(),
        None => text,
    }
}

/// Failures that never produced a response: transport, TLS, request building.
pub(crate) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ReportError {
    ReportError::Network {
        message: format!("{operation} failed: {}", describe_octocrab_error(error)),
    }
}

pub(crate) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ReportError {
    ReportError::MalformedResponse {
        context: operation.to_string(),
        message: error.to_string(),
    }
}
