use super::types::*;
use crate::config::Config;
use crate::error::{UpstreamFailure, WeatherError};
use reqwest::{Client, StatusCode, Url};

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("weather-relay-server/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn api_key(&self) -> Result<&str, WeatherError> {
        match self.config.openweather_api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(WeatherError::MissingApiKey),
        }
    }

    pub fn weather_url(&self, location: &Location, api_key: &str) -> Url {
        let mut url = self.config.openweather_weather_url.clone();
        {
            let mut query = url.query_pairs_mut();
            match location {
                Location::Coordinates { lat, lon } => {
                    query
                        .append_pair("lat", &lat.to_string())
                        .append_pair("lon", &lon.to_string());
                }
                Location::City(city) => {
                    query.append_pair("q", city);
                }
            }
            query.append_pair("appid", api_key).append_pair("units", "metric");
        }
        url
    }

    /// Issues the single GET for `url`. The response is dropped on every
    /// return path, which releases the connection.
    pub async fn fetch_current(&self, url: Url) -> Result<CurrentWeatherResponse, WeatherError> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamFailure::Status(status).into());
        }

        let body = response.text().await.map_err(transport_error)?;
        let record: CurrentWeatherResponse = serde_json::from_str(&body)?;
        Ok(record)
    }
}

fn transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        WeatherError::Timeout
    } else {
        UpstreamFailure::Transport(err).into()
    }
}

/// Copy of `url` safe to log: the `appid` value is masked.
pub fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "appid" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}
