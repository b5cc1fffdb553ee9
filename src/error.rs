//! Error taxonomy for a recap run.

use thiserror::Error;

pub const EXIT_AUTH: i32 = 1;
pub const EXIT_NETWORK: i32 = 2;
pub const EXIT_RATE_LIMIT: i32 = 3;
pub const EXIT_CONFIG: i32 = 4;

/// Every failure that can abort a run. None of them are recovered locally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// A required environment variable is unset or blank.
    #[error("{variable} environment variable not set\n\n{hint}")]
    Configuration {
        variable: &'static str,
        hint: &'static str,
    },

    /// GitHub rejected the token (401).
    #[error("GitHub rejected the credentials ({status}): {message}")]
    Authentication { status: u16, message: String },

    /// GitHub refused the request because the quota is exhausted.
    #[error("GitHub API rate limit exceeded ({status}): {message}")]
    RateLimited { status: u16, message: String },

    /// Too few search requests left to run the queries.
    #[error(
        "only {remaining} GitHub search requests remaining (need {required}); \
         wait for the rate limit to reset"
    )]
    InsufficientBudget { remaining: u32, required: u32 },

    /// Any other non-2xx response.
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("network error talking to GitHub: {message}")]
    Network { message: String },

    /// The response was missing or mistyped a field we rely on.
    #[error("malformed GitHub response for {context}: {message}")]
    MalformedResponse { context: String, message: String },
}

impl ReportError {
    /// Status code of the API response behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReportError::Authentication { status, .. }
            | ReportError::RateLimited { status, .. }
            | ReportError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self,
            ReportError::RateLimited { .. } | ReportError::InsufficientBudget { .. }
        )
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::Configuration { .. } => EXIT_CONFIG,
            ReportError::Authentication { .. } => EXIT_AUTH,
            ReportError::RateLimited { .. } | ReportError::InsufficientBudget { .. } => {
                EXIT_RATE_LIMIT
            }
            ReportError::Api { .. }
            | ReportError::Network { .. }
            | ReportError::MalformedResponse { .. } => EXIT_NETWORK,
        }
    }
}
