mod analysis;
mod benchmark;
mod career_break;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod models;
mod negotiation;
mod resolution;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::benchmark::warehouse::PgSalaryWarehouse;
use crate::career_break::sandbox::NessieSandbox;
use crate::config::Config;
use crate::db::create_lazy_pool;
use crate::llm_client::LlmClient;
use crate::negotiation::store::RedisTipStore;
use crate::routes::build_router;
use crate::state::{AppState, Sources};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Equity Gap API v{}", env!("CARGO_PKG_VERSION"));

    let sources = connect_sources(&config);
    info!(
        "Live sources: warehouse={} tip_store={} sandbox={} coach={}",
        sources.warehouse.is_some(),
        sources.tip_store.is_some(),
        sources.sandbox.is_some(),
        sources.coach.is_some()
    );

    let state = AppState::new(&config, sources);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds whichever live collaborators are configured. A source that cannot be
/// constructed is skipped so its fallback answers instead.
fn connect_sources(config: &Config) -> Sources {
    let mut sources = Sources::default();

    if let Some(url) = &config.warehouse_url {
        match create_lazy_pool(url, config.external_timeout) {
            Ok(pool) => sources.warehouse = Some(Arc::new(PgSalaryWarehouse::new(pool))),
            Err(e) => warn!("Salary warehouse disabled: {e:#}"),
        }
    }

    if let Some(url) = &config.redis_url {
        match redis::Client::open(url.as_str()) {
            Ok(client) => sources.tip_store = Some(Arc::new(RedisTipStore::new(client))),
            Err(e) => warn!("Tip store disabled: {e}"),
        }
    }

    if let Some(key) = &config.nessie_api_key {
        match NessieSandbox::new(
            config.nessie_base_url.clone(),
            key.clone(),
            config.external_timeout,
        ) {
            Ok(sandbox) => sources.sandbox = Some(Arc::new(sandbox)),
            Err(e) => warn!("Banking sandbox disabled: {e}"),
        }
    }

    if let Some(key) = &config.anthropic_api_key {
        match LlmClient::new(key.clone(), config.external_timeout) {
            Ok(client) => {
                info!("Coach enabled (model: {})", llm_client::MODEL);
                sources.coach = Some(Arc::new(client));
            }
            Err(e) => warn!("Coach disabled: {e}"),
        }
    }

    sources
}
