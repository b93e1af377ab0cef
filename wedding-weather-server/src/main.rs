//! HTTP API for the wedding-site weather feature.
//!
//! Exposes `GET /weather` with the `{success, data|error}` envelope the
//! site frontend expects, plus a `GET /health` liveness probe.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::load();
    let state = Arc::new(state::AppState::new(&config));

    let app = routes::router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
