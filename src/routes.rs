use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::WeatherError,
    weather::{
        lookup::WeatherLookup,
        types::{WeatherParams, WeatherReport},
    },
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub weather_lookup: Arc<WeatherLookup>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeatherReport>, WeatherError> {
    let Query(pairs) = query.map_err(|rejection| {
        tracing::warn!("Unreadable /weather query: {}", rejection);
        WeatherError::InvalidRequest("Invalid query string")
    })?;
    let params = WeatherParams::from_pairs(pairs);

    let report = state.weather_lookup.handle(&params).await?;
    Ok(Json(report))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .with_state(state)
}
