use serde::{Deserialize, Deserializer, Serialize};

pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}

/// Raw query string of `GET /weather`.
#[derive(Debug, Clone, Default)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl WeatherParams {
    /// Builds params from decoded query pairs. The first occurrence of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut params.city,
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates { lat: f64, lon: f64 },
    City(String),
}

/// Decodes `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// `null` entries inside the list become blank conditions.
fn conditions_or_empty<'de, D>(deserializer: D) -> Result<Vec<CurrentCondition>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<CurrentCondition>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

// Upstream `/data/2.5/weather` payload. Absent or null fields decode to zero
// values, so only malformed JSON or a type mismatch fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coord: CurrentCoord,
    #[serde(deserialize_with = "null_as_default")]
    pub main: CurrentMain,
    #[serde(deserialize_with = "conditions_or_empty")]
    pub weather: Vec<CurrentCondition>,
    #[serde(deserialize_with = "null_as_default")]
    pub wind: CurrentWind,
    #[serde(deserialize_with = "null_as_default")]
    pub visibility: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub clouds: CurrentClouds,
    #[serde(deserialize_with = "null_as_default")]
    pub sys: CurrentSys,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentCoord {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentMain {
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub feels_like: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_max: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub humidity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentCondition {
    #[serde(deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWind {
    #[serde(deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub deg: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentClouds {
    #[serde(deserialize_with = "null_as_default")]
    pub all: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentSys {
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sunrise: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: String,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub wind_deg: i64,
    pub visibility: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub clouds: i64,
    pub icon: String,
    pub timezone: i64,
}

impl CurrentWeatherResponse {
    /// Flattens the record using its first condition. Returns `None` when the
    /// provider sent no conditions at all.
    pub fn to_report(&self) -> Option<WeatherReport> {
        let primary = self.weather.first()?;

        Some(WeatherReport {
            city: self.name.clone(),
            country: self.sys.country.clone(),
            lat: self.coord.lat,
            lon: self.coord.lon,
            temp: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            condition: primary.main.clone(),
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg,
            visibility: self.visibility,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            clouds: self.clouds.all,
            icon: icon_url(&primary.icon),
            timezone: self.timezone,
        })
    }
}
