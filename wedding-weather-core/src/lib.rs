//! Core library for the wedding-site weather feature.
//!
//! This crate defines:
//! - Site-settings access (wedding date, venue name)
//! - Upstream clients for the live forecast and climate-archive APIs
//! - Historical multi-year averaging and the synthetic fallback profile
//! - The resolver that picks forecast vs. historical per request
//!
//! It is used by `wedding-weather-server` and `wedding-weather-cli`,
//! but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fallback;
pub mod history;
pub mod model;
pub mod provider;
pub mod resolver;

pub use config::{Settings, SettingsStore};
pub use error::WeatherError;
pub use model::{
    DailySummary, DayProfile, HourlyForecastPoint, WeatherCode, WeatherResult, WeatherSource,
};
pub use provider::{ArchiveProvider, ForecastProvider, OpenMeteoArchive, OpenMeteoForecast};
pub use resolver::{CachePolicy, Resolved, WeatherResolver};
