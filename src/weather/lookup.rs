use super::openweather::{redacted, OpenWeatherClient};
use super::types::{Location, WeatherParams, WeatherReport};
use crate::error::WeatherError;

const MISSING_LOCATION: &str = "City or coordinates required";
const INVALID_COORDINATES: &str = "Invalid coordinates";

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl WeatherParams {
    /// Coordinates win over `city` whenever both `lat` and `lon` are given.
    pub fn resolve(&self) -> Result<Location, WeatherError> {
        if let (Some(lat), Some(lon)) = (present(&self.lat), present(&self.lon)) {
            let lat: f64 = lat
                .parse()
                .map_err(|_| WeatherError::InvalidRequest(INVALID_COORDINATES))?;
            let lon: f64 = lon
                .parse()
                .map_err(|_| WeatherError::InvalidRequest(INVALID_COORDINATES))?;
            if !is_valid_coordinates(lat, lon) {
                return Err(WeatherError::InvalidRequest(INVALID_COORDINATES));
            }
            Ok(Location::Coordinates { lat, lon })
        } else if let Some(city) = present(&self.city) {
            Ok(Location::City(city.to_string()))
        } else {
            Err(WeatherError::InvalidRequest(MISSING_LOCATION))
        }
    }
}

fn is_valid_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Translates a `/weather` query into one provider call and a flattened report.
pub struct WeatherLookup {
    client: OpenWeatherClient,
}

impl WeatherLookup {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    pub async fn handle(&self, params: &WeatherParams) -> Result<WeatherReport, WeatherError> {
        tracing::info!(
            city = ?params.city,
            lat = ?params.lat,
            lon = ?params.lon,
            "Received /weather request"
        );

        let api_key = self.client.api_key()?;
        let location = params.resolve()?;
        let url = self.client.weather_url(&location, api_key);
        tracing::debug!(url = %redacted(&url), "Fetching weather from OpenWeather API");

        let record = self.client.fetch_current(url).await?;
        let report = record.to_report().ok_or(WeatherError::EmptyResult)?;

        tracing::info!(
            city = %report.city,
            country = %report.country,
            temp = report.temp,
            feels_like = report.feels_like,
            condition = %report.condition,
            humidity = report.humidity,
            pressure = report.pressure,
            wind_speed = report.wind_speed,
            clouds = report.clouds,
            "Weather lookup succeeded"
        );
        Ok(report)
    }
}
