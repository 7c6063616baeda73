mod config;
mod document;
mod errors;
mod models;
mod nlp;
mod parsing;
mod ranking;
mod reference;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp::{EntityModel, HeuristicPipeline, NoEntityModel, RemoteEntityModel};
use crate::parsing::extractors::PhonePattern;
use crate::parsing::ResumeParser;
use crate::reference::{load_reference_tables, ReferencePaths};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resparser v{}", env!("CARGO_PKG_VERSION"));

    // Reference tables are required; a missing CSV aborts startup
    let paths = ReferencePaths::in_dir(&config.data_dir, config.skills_file.as_deref());
    let reference = Arc::new(
        load_reference_tables(&paths)
            .with_context(|| format!("Loading reference data from {}", config.data_dir.display()))?,
    );

    let pipeline = Arc::new(HeuristicPipeline::new(reference.stop_words().clone()));
    let entity_model = build_entity_model(&config).await?;

    let phone = match &config.phone_pattern {
        Some(pattern) => {
            info!("Using custom phone pattern: {pattern}");
            PhonePattern::Custom(pattern.clone())
        }
        None => PhonePattern::Default,
    };

    let parser = Arc::new(ResumeParser::new(reference, pipeline, entity_model, phone));

    let state = AppState {
        parser,
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

/// Remote entity model when `ENTITY_MODEL_URL` is set, otherwise none.
/// The blocking HTTP client owns its own runtime, so it is built off the async workers.
async fn build_entity_model(config: &Config) -> Result<Arc<dyn EntityModel>> {
    let Some(url) = config.entity_model_url.clone() else {
        info!("No entity model configured");
        return Ok(Arc::new(NoEntityModel));
    };

    info!("Entity model endpoint: {url}");
    let model = tokio::task::spawn_blocking(move || RemoteEntityModel::new(url))
        .await
        .context("Entity model client task failed")?
        .context("Building entity model client")?;
    Ok(Arc::new(model))
}
