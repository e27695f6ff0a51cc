//! symptora: health-query webhook server.
//!
//! Startup: `.env` → `symptora.toml` → logging → reference cache → router →
//! serve. Reference documents are fetched lazily on first use, so the server
//! comes up even when the data host is unreachable.

use std::sync::Arc;

use symptora_config::Config;
use symptora_data::{HttpFetcher, ReferenceCache, SourceUrls};
use symptora_ranker::Ranker;
use symptora_web::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logging depends on the config, so load it first and report afterwards.
    let loaded = Config::load();
    let filter = match &loaded {
        Ok(c) => c.logging.filter.clone(),
        Err(_) => Config::default().logging.filter,
    };

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    info!("Symptora starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(c) => {
            info!(
                source = ?c.matching.source,
                max_results = c.matching.max_results,
                timeout_secs = c.data.fetch_timeout_secs,
                "Configuration loaded"
            );
            c
        }
        Err(e) => {
            warn!("Could not load configuration: {e}");
            warn!("Copy symptora.example.toml to symptora.toml and edit it.");
            return Err(e.into());
        }
    };

    let fetcher = HttpFetcher::from_config(&config.data)?;
    let cache = Arc::new(ReferenceCache::new(
        Arc::new(fetcher),
        SourceUrls::from(&config.data),
    ));
    info!(sources = config.data.source_urls().len(), "Reference cache ready (lazy)");

    let state = AppState::new(cache, Ranker::from(&config.matching));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on http://{}", config.server.bind);
    info!("   Webhook:  POST /webhook");
    info!("   SMS:      POST /sms");
    info!("   Health:   GET  /health");

    axum::serve(listener, router).await?;

    Ok(())
}
