use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde_json::json;

use crate::{error::ApiError, state::AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_weather(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let settings = state.load_settings()?;
    let resolved = state.resolver.resolve(Utc::now(), &settings).await?;

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, resolved.cache.header_value())],
        Json(json!({ "success": true, "data": resolved.result })),
    ))
}
