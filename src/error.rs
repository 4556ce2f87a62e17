use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why the provider call failed. Logged only; callers see one error.
#[derive(Error, Debug)]
pub enum UpstreamFailure {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("OPENWEATHER_API_KEY not set")]
    MissingApiKey,
    #[error("weather provider unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamFailure),
    #[error("weather provider timed out")]
    Timeout,
    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider returned no weather conditions")]
    EmptyResult,
}

impl WeatherError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WeatherError::UpstreamUnavailable(_) => StatusCode::NOT_FOUND,
            WeatherError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            WeatherError::MissingApiKey
            | WeatherError::Decode(_)
            | WeatherError::EmptyResult => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller in the `error` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            WeatherError::InvalidRequest(message) => *message,
            WeatherError::MissingApiKey => "API key not set",
            WeatherError::UpstreamUnavailable(_) => "City not found or API error",
            WeatherError::Timeout => "Weather API request timed out",
            WeatherError::Decode(_) => "Failed to parse weather data",
            WeatherError::EmptyResult => "No weather data found",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, "Weather lookup failed: {}", self);
        } else {
            tracing::warn!(status = %status, "Weather lookup rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
