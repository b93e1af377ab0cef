use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{error::WeatherError, model::DayProfile};

pub mod archive;
pub mod forecast;

pub use archive::{ArchiveDay, OpenMeteoArchive};
pub use forecast::OpenMeteoForecast;

/// Live forecast source for a single day at the venue.
///
/// Implementations must return exactly 24 hourly points or fail; a
/// partial forecast is indistinguishable from a real low-signal day and
/// must never be faked.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_day(&self, date: NaiveDate) -> Result<DayProfile, WeatherError>;
}

/// Climate-archive source for one past day at the venue.
///
/// Individual hours may be missing (`None`); the historical averager
/// excludes them per-field rather than discarding the whole year.
#[async_trait]
pub trait ArchiveProvider: Send + Sync + Debug {
    async fn fetch_day(&self, date: NaiveDate) -> Result<ArchiveDay, WeatherError>;
}
