//! Open Graph scraping service
//!
//! Fetches remote pages, extracts their Open Graph metadata, and serves
//! it over HTTP, with a short-lived in-process cache in front of the
//! fetch to avoid re-fetching recently-seen URLs.

mod config;
mod error;
mod extract;
mod fetch;
mod server;
mod types;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::server::{start_server, ServerState, SharedState};
use crate::types::ScrapResult;
use expiring_cache::ExpiringCache;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: the log destination comes from the config file.
    let config = Config::load()?;
    init_tracing(config.log_path.as_deref())?;

    info!("Starting og-scraper...");
    info!("Port: {}", config.port);
    info!("Response type: {}", config.page_type);
    info!("Cache TTL: {} seconds", config.cache_ttl.as_secs());
    info!("Sweep interval: {} seconds", config.sweep_interval.as_secs());

    let cache: ExpiringCache<ScrapResult> = ExpiringCache::new();
    let sweeper = cache.spawn_sweeper(config.sweep_interval);

    let fetcher = PageFetcher::new();
    let state: SharedState = Arc::new(ServerState::new(
        cache,
        fetcher,
        config.page_type,
        config.cache_ttl,
    ));

    // Runs until a shutdown signal arrives
    start_server(state, config.port).await?;

    sweeper.abort();
    info!("Shut down");
    Ok(())
}

/// Initialize logging to stdout or, when configured, a log file
///
/// `LOG_FORMAT=json` selects JSON output.
fn init_tracing(log_path: Option<&Path>) -> Result<()> {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let env_filter = || -> Result<EnvFilter> {
        Ok(EnvFilter::from_default_env().add_directive("og_scraper=info".parse()?))
    };

    match log_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let writer = Arc::new(file);
            if json {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter()?)
                    .json()
                    .with_writer(writer)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter()?)
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
            }
        }
        None => {
            if json {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter()?)
                    .json()
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter()?)
                    .init();
            }
        }
    }

    Ok(())
}
