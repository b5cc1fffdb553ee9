pub mod api;
pub mod client;
pub(crate) mod error_mapping;
pub mod search;
pub mod types;

pub use api::ActivityApi;
pub use client::{
    api_url_from_env, create_client, install_crypto_provider, DEFAULT_API_URL, ENV_API_URL_VAR,
};
pub use search::{OctocrabActivityApi, RateLimitStatus, MIN_SEARCH_BUDGET};
pub use types::{Commit, ItemRef, PrRef};
