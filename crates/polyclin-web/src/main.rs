//! Polyclin Web Server
//!
//! Run with: cargo run -p polyclin-web

use std::path::Path;
use std::sync::Arc;

use candle_core::Device;
use polyclin_llm::GeminiBackend;
use polyclin_models::ModelRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polyclin_web=debug,info")),
        )
        .init();

    info!("Polyclin starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Startup preconditions: config, credential, and all three classifier
    // artifacts must be present before the server binds.
    let config = polyclin_web::config::Config::load()?;
    let api_key = config.resolve_api_key()?;

    let registry = ModelRegistry::load(Path::new(&config.models.dir), &Device::Cpu)?;
    info!("All classifier artifacts loaded from {}", config.models.dir);

    let advisory = Arc::new(GeminiBackend::new(api_key, config.llm.model.clone()));
    info!("Advisory backend ready: {}", config.llm.model);

    let state = polyclin_web::state::AppState::new(registry, advisory);
    let app = polyclin_web::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
