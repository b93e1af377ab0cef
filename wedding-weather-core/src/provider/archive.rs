use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::{VENUE_LATITUDE, VENUE_LONGITUDE, VENUE_TZ},
    error::{WeatherError, truncate_body},
};

use super::ArchiveProvider;

const PROVIDER: &str = "open-meteo archive";
const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
                             precipitation,weather_code,wind_speed_10m,wind_gusts_10m,\
                             cloud_cover";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// One past day's observations at the venue. Hours the archive did not
/// record are `None` and are excluded per-field during averaging; the
/// archive carries no UV data at all.
#[derive(Debug, Clone, Default)]
pub struct ArchiveDay {
    pub temperature: Vec<Option<f64>>,
    pub feels_like: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub wind_speed: Vec<Option<f64>>,
    pub wind_gusts: Vec<Option<f64>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    /// The day's own max/min as recorded by the archive, kept separate
    /// from the hourly series on purpose: daily extremes are averaged
    /// across years as-is, never recomputed from averaged hours.
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Client for the Open-Meteo climate-archive API.
#[derive(Debug, Clone)]
pub struct OpenMeteoArchive {
    http: Client,
    base_url: String,
}

impl Default for OpenMeteoArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoArchive {
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ArchiveProvider for OpenMeteoArchive {
    async fn fetch_day(&self, date: NaiveDate) -> Result<ArchiveDay, WeatherError> {
        let date_str = date.format("%Y-%m-%d").to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", VENUE_LATITUDE.to_string()),
                ("longitude", VENUE_LONGITUDE.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("precipitation_unit", "inch".to_string()),
                ("timezone", VENUE_TZ.name().to_string()),
                ("start_date", date_str.clone()),
                ("end_date", date_str),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Network {
                provider: PROVIDER,
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Network {
            provider: PROVIDER,
            source,
        })?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: ArchiveResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::MalformedResponse {
                provider: PROVIDER,
                detail: e.to_string(),
            })?;

        Ok(day_from_response(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: ArchiveHourly,
    #[serde(default)]
    daily: ArchiveDaily,
}

#[derive(Debug, Deserialize)]
struct ArchiveHourly {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    wind_gusts_10m: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize, Default)]
struct ArchiveDaily {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

fn day_from_response(resp: ArchiveResponse) -> ArchiveDay {
    let hourly = resp.hourly;
    let daily = resp.daily;

    ArchiveDay {
        temperature: hourly.temperature_2m,
        feels_like: hourly.apparent_temperature,
        humidity: hourly.relative_humidity_2m,
        precipitation: hourly.precipitation,
        wind_speed: hourly.wind_speed_10m,
        wind_gusts: hourly.wind_gusts_10m,
        cloud_cover: hourly.cloud_cover,
        weather_code: hourly.weather_code,
        temperature_max: daily.temperature_2m_max.first().copied().flatten(),
        temperature_min: daily.temperature_2m_min.first().copied().flatten(),
        sunrise: daily.sunrise.first().cloned(),
        sunset: daily.sunset.first().cloned(),
    }
}
