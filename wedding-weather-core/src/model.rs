use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where the numbers in a [`WeatherResult`] came from.
///
/// A synthetic fallback profile is reported as `Historical` to keep the
/// public contract stable; the distinction is logged server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Forecast,
    Historical,
}

/// WMO-style categorical weather code.
///
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    LightFreezingDrizzle,
    DenseFreezingDrizzle,
    SlightRain,
    ModerateRain,
    HeavyRain,
    LightFreezingRain,
    HeavyFreezingRain,
    SlightSnow,
    ModerateSnow,
    HeavySnow,
    SnowGrains,
    SlightRainShowers,
    ModerateRainShowers,
    ViolentRainShowers,
    SlightSnowShowers,
    HeavySnowShowers,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
    #[default]
    Unknown,
}

impl WeatherCode {
    /// Map a provider WMO code to a category. Unrecognized codes map to
    /// [`WeatherCode::Unknown`] rather than failing the whole response.
    pub fn from_wmo(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 => Self::LightDrizzle,
            53 => Self::ModerateDrizzle,
            55 => Self::DenseDrizzle,
            56 => Self::LightFreezingDrizzle,
            57 => Self::DenseFreezingDrizzle,
            61 => Self::SlightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            66 => Self::LightFreezingRain,
            67 => Self::HeavyFreezingRain,
            71 => Self::SlightSnow,
            73 => Self::ModerateSnow,
            75 => Self::HeavySnow,
            77 => Self::SnowGrains,
            80 => Self::SlightRainShowers,
            81 => Self::ModerateRainShowers,
            82 => Self::ViolentRainShowers,
            85 => Self::SlightSnowShowers,
            86 => Self::HeavySnowShowers,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormSlightHail,
            99 => Self::ThunderstormHeavyHail,
            _ => Self::Unknown,
        }
    }

    /// Human-readable description for terminal/display use.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::RimeFog => "Depositing rime fog",
            Self::LightDrizzle => "Light drizzle",
            Self::ModerateDrizzle => "Drizzle",
            Self::DenseDrizzle => "Dense drizzle",
            Self::LightFreezingDrizzle => "Light freezing drizzle",
            Self::DenseFreezingDrizzle => "Freezing drizzle",
            Self::SlightRain => "Slight rain",
            Self::ModerateRain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::LightFreezingRain => "Light freezing rain",
            Self::HeavyFreezingRain => "Freezing rain",
            Self::SlightSnow => "Slight snow",
            Self::ModerateSnow => "Snow",
            Self::HeavySnow => "Heavy snow",
            Self::SnowGrains => "Snow grains",
            Self::SlightRainShowers => "Slight rain showers",
            Self::ModerateRainShowers => "Rain showers",
            Self::ViolentRainShowers => "Violent rain showers",
            Self::SlightSnowShowers => "Slight snow showers",
            Self::HeavySnowShowers => "Heavy snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormSlightHail => "Thunderstorm with slight hail",
            Self::ThunderstormHeavyHail => "Thunderstorm with heavy hail",
            Self::Unknown => "Unknown",
        }
    }
}

/// `"12 AM"`, `"3 PM"` style label for an hour of day in venue-local time.
pub fn hour_label(hour: u8) -> String {
    let (h, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{h} {suffix}")
}

/// One hour of one day. Every day has exactly 24 of these (hours 0-23).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecastPoint {
    pub hour: u8,
    /// Venue-local label, e.g. `"3 PM"`.
    pub time: String,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent.
    pub humidity: f64,
    /// Percent.
    pub precipitation_probability: f64,
    /// Inches.
    pub precipitation: f64,
    pub weather_code: WeatherCode,
    /// Miles per hour.
    pub wind_speed: f64,
    pub wind_gusts: f64,
    /// Percent.
    pub cloud_cover: f64,
    pub uv_index: f64,
}

/// Aggregate of a day's hourly points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_probability_max: f64,
    /// ISO local timestamps as reported upstream, e.g. `"2026-06-20T06:32"`.
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub uv_index_max: f64,
    pub weather_code: WeatherCode,
}

/// A full day's weather as produced by any of the three sources
/// (live forecast, historical average, synthetic fallback).
#[derive(Debug, Clone, PartialEq)]
pub struct DayProfile {
    pub hourly: Vec<HourlyForecastPoint>,
    pub daily: DailySummary,
}

/// Top-level response for the weather endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub source: WeatherSource,
    pub date: NaiveDate,
    pub venue_name: String,
    pub hourly: Vec<HourlyForecastPoint>,
    pub daily: Option<DailySummary>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_labels_cover_am_pm_boundaries() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(1), "1 AM");
        assert_eq!(hour_label(11), "11 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(15), "3 PM");
        assert_eq!(hour_label(23), "11 PM");
    }

    #[test]
    fn known_wmo_codes_map_to_categories() {
        assert_eq!(WeatherCode::from_wmo(0), WeatherCode::ClearSky);
        assert_eq!(WeatherCode::from_wmo(3), WeatherCode::Overcast);
        assert_eq!(WeatherCode::from_wmo(80), WeatherCode::SlightRainShowers);
        assert_eq!(WeatherCode::from_wmo(95), WeatherCode::Thunderstorm);
        assert_eq!(WeatherCode::from_wmo(99), WeatherCode::ThunderstormHeavyHail);
    }

    #[test]
    fn unrecognized_wmo_codes_do_not_crash() {
        assert_eq!(WeatherCode::from_wmo(42), WeatherCode::Unknown);
        assert_eq!(WeatherCode::from_wmo(-1), WeatherCode::Unknown);
        assert_eq!(WeatherCode::from_wmo(1000), WeatherCode::Unknown);
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&WeatherSource::Forecast).unwrap(),
            "\"forecast\""
        );
        assert_eq!(
            serde_json::to_string(&WeatherSource::Historical).unwrap(),
            "\"historical\""
        );
    }

    #[test]
    fn hourly_point_uses_camel_case_wire_names() {
        let point = HourlyForecastPoint {
            hour: 15,
            time: hour_label(15),
            temperature: 88.0,
            feels_like: 94.0,
            humidity: 70.0,
            precipitation_probability: 40.0,
            precipitation: 0.02,
            weather_code: WeatherCode::SlightRainShowers,
            wind_speed: 8.0,
            wind_gusts: 14.0,
            cloud_cover: 55.0,
            uv_index: 7.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["feelsLike"], 94.0);
        assert_eq!(json["precipitationProbability"], 40.0);
        assert_eq!(json["weatherCode"], "slight_rain_showers");
    }
}
