mod catalog;
mod config;
mod errors;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::loader::load_catalog;
use crate::config::Config;
use crate::matching::ranker::MatchWeights;
use crate::matching::relevance::TfIdfScorer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CogniLink API v{}", env!("CARGO_PKG_VERSION"));

    // Load reference data once; handlers share it read-only
    let catalog = Arc::new(load_catalog(&config.jobs_path, &config.courses_path).await?);
    info!(
        "Catalog ready: {} jobs, {} courses, {} distinct skills",
        catalog.jobs.len(),
        catalog.courses.len(),
        catalog.all_skills().len()
    );

    // Initialize relevance scorer (TF-IDF by default)
    let scorer = Arc::new(TfIdfScorer::new(config.stop_words)?);
    info!("Relevance scorer initialized (stop words: {:?})", config.stop_words);

    // Build app state
    let state = AppState {
        catalog,
        scorer,
        weights: MatchWeights::default(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
