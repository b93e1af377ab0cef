//! Synthetic day profile for when the climate archive is entirely
//! unavailable. The product requirement is "always show something", so
//! total archive failure degrades to this rather than erroring.
//!
//! The constants model a typical Gulf-coast Florida summer day:
//! pre-dawn low, late-morning rise, early-afternoon peak with an
//! elevated thunderstorm chance, evening decline. They are tied to the
//! venue in `config.rs`; a different venue climate needs a different
//! table, these numbers are not universal.

use chrono::NaiveDate;

use crate::{
    history::{mode, uv_for_hour},
    model::{DailySummary, DayProfile, HourlyForecastPoint, WeatherCode, hour_label},
};

struct Band {
    temperature: f64,
    feels_like_offset: f64,
    humidity: f64,
    cloud_cover: f64,
    precipitation_probability: f64,
    precipitation: f64,
    wind_speed: f64,
    wind_gusts: f64,
    wmo_code: i32,
}

fn band_for_hour(hour: u8) -> Band {
    match hour {
        // Pre-dawn: warm, humid, mostly quiet.
        0..=5 => Band {
            temperature: 76.0,
            feels_like_offset: 3.0,
            humidity: 90.0,
            cloud_cover: 30.0,
            precipitation_probability: 10.0,
            precipitation: 0.0,
            wind_speed: 5.0,
            wind_gusts: 8.0,
            wmo_code: 1,
        },
        // Morning rise.
        6..=9 => Band {
            temperature: 82.0,
            feels_like_offset: 4.0,
            humidity: 80.0,
            cloud_cover: 25.0,
            precipitation_probability: 10.0,
            precipitation: 0.0,
            wind_speed: 6.0,
            wind_gusts: 10.0,
            wmo_code: 1,
        },
        // Late morning: heating up, cumulus building.
        10..=12 => Band {
            temperature: 88.0,
            feels_like_offset: 6.0,
            humidity: 70.0,
            cloud_cover: 40.0,
            precipitation_probability: 20.0,
            precipitation: 0.0,
            wind_speed: 8.0,
            wind_gusts: 13.0,
            wmo_code: 2,
        },
        // Afternoon peak: sea-breeze thunderstorm window.
        13..=17 => Band {
            temperature: 91.0,
            feels_like_offset: 8.0,
            humidity: 65.0,
            cloud_cover: 60.0,
            precipitation_probability: 55.0,
            precipitation: 0.08,
            wind_speed: 10.0,
            wind_gusts: 18.0,
            wmo_code: 80,
        },
        // Evening decline, storms tapering.
        18..=20 => Band {
            temperature: 85.0,
            feels_like_offset: 5.0,
            humidity: 75.0,
            cloud_cover: 45.0,
            precipitation_probability: 30.0,
            precipitation: 0.02,
            wind_speed: 7.0,
            wind_gusts: 12.0,
            wmo_code: 2,
        },
        // Night.
        _ => Band {
            temperature: 79.0,
            feels_like_offset: 3.0,
            humidity: 85.0,
            cloud_cover: 30.0,
            precipitation_probability: 15.0,
            precipitation: 0.0,
            wind_speed: 5.0,
            wind_gusts: 9.0,
            wmo_code: 1,
        },
    }
}

/// Build a fully synthetic but plausible profile for the given date.
/// Pure function of its input: no I/O, no randomness, byte-stable
/// across calls.
pub fn synthetic_profile(date: NaiveDate) -> DayProfile {
    let hourly: Vec<HourlyForecastPoint> = (0u8..24)
        .map(|hour| {
            let band = band_for_hour(hour);
            HourlyForecastPoint {
                hour,
                time: hour_label(hour),
                temperature: band.temperature,
                feels_like: band.temperature + band.feels_like_offset,
                humidity: band.humidity,
                precipitation_probability: band.precipitation_probability,
                precipitation: band.precipitation,
                weather_code: WeatherCode::from_wmo(band.wmo_code),
                wind_speed: band.wind_speed,
                wind_gusts: band.wind_gusts,
                cloud_cover: band.cloud_cover,
                uv_index: uv_for_hour(hour),
            }
        })
        .collect();

    let daily = DailySummary {
        temperature_max: hourly.iter().map(|p| p.temperature).fold(f64::MIN, f64::max),
        temperature_min: hourly.iter().map(|p| p.temperature).fold(f64::MAX, f64::min),
        precipitation_probability_max: hourly
            .iter()
            .map(|p| p.precipitation_probability)
            .fold(0.0, f64::max),
        sunrise: Some(format!("{date}T06:45")),
        sunset: Some(format!("{date}T20:15")),
        uv_index_max: hourly.iter().map(|p| p.uv_index).fold(0.0, f64::max),
        weather_code: mode(hourly.iter().map(|p| p.weather_code)).unwrap_or_default(),
    };

    DayProfile { hourly, daily }
}
