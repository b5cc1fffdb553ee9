use http::Uri;
use octocrab::Octocrab;

use crate::error::ReportError;

use super::error_mapping::map_octocrab_error;

/// Public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Environment variable overriding the API base (GitHub Enterprise, mock servers)
pub const ENV_API_URL_VAR: &str = "GITHUB_API_URL";

/// Resolve the API base from the environment, falling back to api.github.com
pub fn api_url_from_env() -> String {
    api_url_with(|name| std::env::var(name).ok())
}

fn api_url_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_API_URL_VAR)
        .map(|val| val.trim().trim_end_matches('/').to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Install the ring crypto provider rustls 0.23 needs before any TLS
/// connection. Safe to call repeatedly; later calls are no-ops.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        log::trace!("rustls crypto provider already installed");
    }
}

/// Create an authenticated GitHub client using a personal access token
pub fn create_client(token: &str, api_url: &str) -> Result<Octocrab, ReportError> {
    install_crypto_provider();

    let base_uri: Uri = api_url
        .parse::<Uri>()
        .map_err(|e| ReportError::Network {
            message: format!("invalid API base URL {api_url}: {e}"),
        })?;

    Octocrab::builder()
        .personal_token(token.to_string())
        .base_uri(base_uri)
        .map_err(|e| ReportError::Network {
            message: format!("invalid API base URL {api_url}: {e}"),
        })?
        .build()
        .map_err(|e| map_octocrab_error("build client", &e))
}
