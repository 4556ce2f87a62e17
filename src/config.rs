use anyhow::Context;
use reqwest::Url;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Missing keys are reported per request, not at startup.
    pub openweather_api_key: Option<String>,
    pub openweather_weather_url: Url,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout_secs = match env::var("OPENWEATHER_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => 10,
        };

        let base_url = env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| "https://api.openweathermap.org".to_string());
        let weather_path = env::var("OPENWEATHER_WEATHER_PATH")
            .unwrap_or_else(|_| "/data/2.5/weather".to_string());

        Ok(Config {
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openweather_weather_url: weather_endpoint(&base_url, &weather_path)?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Joins the provider base and path into the current-weather endpoint.
pub fn weather_endpoint(base_url: &str, path: &str) -> anyhow::Result<Url> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), path);
    let url = Url::parse(&endpoint)
        .with_context(|| format!("invalid OpenWeather endpoint {:?}", endpoint))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("OpenWeather endpoint must be an http(s) URL, got {:?}", endpoint);
    }
    Ok(url)
}

fn parse_timeout_secs(raw: &str) -> anyhow::Result<u64> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        anyhow::anyhow!("OPENWEATHER_TIMEOUT_SECS must be an integer, got {:?}", raw)
    })?;
    if secs == 0 {
        anyhow::bail!("OPENWEATHER_TIMEOUT_SECS must be greater than zero");
    }
    Ok(secs)
}
