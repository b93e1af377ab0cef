use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::{VENUE_LATITUDE, VENUE_LONGITUDE, VENUE_TZ},
    error::{WeatherError, truncate_body},
    model::{DailySummary, DayProfile, HourlyForecastPoint, WeatherCode, hour_label},
};

use super::ForecastProvider;

const PROVIDER: &str = "open-meteo forecast";
const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
                             precipitation_probability,precipitation,weather_code,\
                             wind_speed_10m,wind_gusts_10m,cloud_cover,uv_index";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,\
                            precipitation_probability_max,sunrise,sunset,\
                            uv_index_max,weather_code";

/// Client for the Open-Meteo forecast API (the ~16-day live window).
///
/// Units are requested explicitly as Fahrenheit/mph/inch and the venue
/// timezone is sent so the hourly series arrives in venue-local order.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl Default for OpenMeteoForecast {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoForecast {
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
impl ForecastProvider for OpenMeteoForecast {
    async fn fetch_day(&self, date: NaiveDate) -> Result<DayProfile, WeatherError> {
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

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::MalformedResponse {
                provider: PROVIDER,
                detail: e.to_string(),
            })?;

        profile_from_response(&parsed)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: ForecastHourly,
    daily: ForecastDaily,
}

#[derive(Debug, Deserialize)]
struct ForecastHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    apparent_temperature: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    precipitation_probability: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
    wind_speed_10m: Vec<Option<f64>>,
    wind_gusts_10m: Vec<Option<f64>>,
    cloud_cover: Vec<Option<f64>>,
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ForecastDaily {
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_probability_max: Vec<Option<f64>>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    uv_index_max: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
}

fn num_at(values: &[Option<f64>], hour: usize) -> f64 {
    values.get(hour).copied().flatten().unwrap_or_default()
}

/// Hourly numeric fields are mandatory on the forecast path: a hole in
/// the series would be indistinguishable from a calm reading, so it is
/// rejected rather than zero-filled. Only the weather code is lenient
/// (unknown/missing codes become [`WeatherCode::Unknown`]).
fn require_at(values: &[Option<f64>], hour: usize, field: &str) -> Result<f64, WeatherError> {
    values
        .get(hour)
        .copied()
        .flatten()
        .ok_or_else(|| WeatherError::MalformedResponse {
            provider: PROVIDER,
            detail: format!("missing {field} at hour {hour}"),
        })
}

fn profile_from_response(resp: &ForecastResponse) -> Result<DayProfile, WeatherError> {
    let hourly = &resp.hourly;

    if hourly.time.len() < 24 {
        return Err(WeatherError::MalformedResponse {
            provider: PROVIDER,
            detail: format!("expected 24 hourly points, got {}", hourly.time.len()),
        });
    }

    let mut points = Vec::with_capacity(24);
    for hour in 0u8..24 {
        let h = usize::from(hour);
        let code = hourly
            .weather_code
            .get(h)
            .copied()
            .flatten()
            .map_or(WeatherCode::Unknown, WeatherCode::from_wmo);

        points.push(HourlyForecastPoint {
            hour,
            time: hour_label(hour),
            temperature: require_at(&hourly.temperature_2m, h, "temperature_2m")?,
            feels_like: require_at(&hourly.apparent_temperature, h, "apparent_temperature")?,
            humidity: require_at(&hourly.relative_humidity_2m, h, "relative_humidity_2m")?,
            precipitation_probability: require_at(
                &hourly.precipitation_probability,
                h,
                "precipitation_probability",
            )?,
            precipitation: require_at(&hourly.precipitation, h, "precipitation")?,
            weather_code: code,
            wind_speed: require_at(&hourly.wind_speed_10m, h, "wind_speed_10m")?,
            wind_gusts: require_at(&hourly.wind_gusts_10m, h, "wind_gusts_10m")?,
            cloud_cover: require_at(&hourly.cloud_cover, h, "cloud_cover")?,
            uv_index: require_at(&hourly.uv_index, h, "uv_index")?,
        });
    }

    let daily = &resp.daily;
    let summary = DailySummary {
        temperature_max: num_at(&daily.temperature_2m_max, 0),
        temperature_min: num_at(&daily.temperature_2m_min, 0),
        precipitation_probability_max: num_at(&daily.precipitation_probability_max, 0),
        sunrise: daily.sunrise.first().cloned(),
        sunset: daily.sunset.first().cloned(),
        uv_index_max: num_at(&daily.uv_index_max, 0),
        weather_code: daily
            .weather_code
            .first()
            .copied()
            .flatten()
            .map_or(WeatherCode::Unknown, WeatherCode::from_wmo),
    };

    Ok(DayProfile {
        hourly: points,
        daily: summary,
    })
}
