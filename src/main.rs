use anyhow::Context;
use clap::Parser;
use std::time::Instant;

use gh_recap::activity::TimeWindow;
use gh_recap::error::ReportError;
use gh_recap::github::OctocrabActivityApi;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "gh-recap")]
#[command(
    about = "List the pull requests and issues you worked on in the last 7 days, by day",
    long_about = "List the pull requests and issues you worked on in the last 7 days, by day.\n\n\
Reads GITHUB_TOKEN and GITHUB_USERNAME from the environment. \
Set GITHUB_API_URL to use a GitHub Enterprise instance and RUST_LOG=info for progress output."
)]
#[command(version)]
struct Cli {}

async fn run() -> anyhow::Result<String> {
    let start_time = Instant::now();
    let window = TimeWindow::ending_at(chrono::Utc::now());

    let credentials = gh_recap::credentials::load_credentials()?;
    log::info!("Reporting activity for {} since {}", credentials.username, window.start);

    let api_url = gh_recap::github::api_url_from_env();
    let client = gh_recap::github::create_client(&credentials.token, &api_url)
        .with_context(|| format!("Failed to create GitHub client for {}", api_url))?;
    let api = OctocrabActivityApi::new(client);

    let limits = api.preflight().await?;
    log::info!(
        "GitHub API rate limits: core {}/{}, search {}/{} remaining",
        limits.core.remaining,
        limits.core.limit,
        limits.search.remaining,
        limits.search.limit
    );

    let days = gh_recap::report::collect_activity(&api, &credentials, &window).await?;

    log::info!(
        "Issued {} API requests in {:?}",
        api.request_count(),
        start_time.elapsed()
    );

    let use_colors = gh_recap::output::should_use_colors();
    Ok(gh_recap::output::format_report(&days, use_colors))
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    gh_recap::github::install_crypto_provider();

    let _cli = Cli::parse();

    match run().await {
        Ok(report) => {
            println!("{}", report);
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<ReportError>()
                .map(ReportError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            std::process::exit(code);
        }
    }
}
