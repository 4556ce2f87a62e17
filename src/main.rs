use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod routes;
mod weather;

use config::Config;
use routes::{create_router, AppState};
use weather::{lookup::WeatherLookup, openweather::OpenWeatherClient};

const LISTEN_ADDR: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_relay_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; /weather will answer 500 until it is");
    }

    let weather_client = OpenWeatherClient::new(config)?;
    let state = AppState {
        weather_lookup: Arc::new(WeatherLookup::new(weather_client)),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Registering /weather route");
    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR).await?;
    tracing::info!("Server starting on http://{}", LISTEN_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
