use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::{SettingsStore, VENUE_TZ},
    error::WeatherError,
    fallback, history,
    model::{DayProfile, WeatherResult, WeatherSource},
    provider::{ArchiveProvider, ForecastProvider, OpenMeteoArchive, OpenMeteoForecast},
};

/// Horizon within which the upstream forecast provider gives real
/// date-specific predictions.
pub const FORECAST_WINDOW_DAYS: i64 = 16;

/// HTTP cache directive to serve alongside a [`WeatherResult`].
/// Forecasts change often and get a short TTL; historical/derived data
/// barely changes and gets a long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub s_maxage: u32,
}

impl CachePolicy {
    pub const FORECAST: Self = Self { s_maxage: 1800 };
    pub const HISTORICAL: Self = Self { s_maxage: 86_400 };

    pub fn header_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate=3600",
            self.s_maxage
        )
    }
}

/// A resolved weather response plus the cache directive to serve it with.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub result: WeatherResult,
    pub cache: CachePolicy,
}

/// Orchestrator: decides forecast vs. historical vs. fallback for the
/// configured wedding date and shapes the unified response.
///
/// Forecast-path upstream failures propagate to the caller; only the
/// historical path degrades (to the synthetic profile). That asymmetry
/// is carried over from the original product behavior on purpose.
#[derive(Debug)]
pub struct WeatherResolver {
    forecast: Arc<dyn ForecastProvider>,
    archive: Arc<dyn ArchiveProvider>,
}

impl WeatherResolver {
    pub fn new(forecast: Arc<dyn ForecastProvider>, archive: Arc<dyn ArchiveProvider>) -> Self {
        Self { forecast, archive }
    }

    /// Resolver wired to the real Open-Meteo endpoints.
    pub fn open_meteo() -> Self {
        Self::new(
            Arc::new(OpenMeteoForecast::new()),
            Arc::new(OpenMeteoArchive::new()),
        )
    }

    /// Produce the weather for the configured wedding date.
    ///
    /// # Errors
    /// - [`WeatherError::NotConfigured`] / [`WeatherError::InvalidWeddingDate`]
    ///   when settings cannot yield a date.
    /// - Upstream errors from the forecast path.
    pub async fn resolve(
        &self,
        now: DateTime<Utc>,
        settings: &dyn SettingsStore,
    ) -> Result<Resolved, WeatherError> {
        let wedding = settings.wedding_date()?.ok_or(WeatherError::NotConfigured)?;
        let venue_name = settings.venue_name();

        let local_now = now.with_timezone(&VENUE_TZ).naive_local();
        let days = days_until(local_now, wedding);
        let target = wedding.date();

        if (0..=FORECAST_WINDOW_DAYS).contains(&days) {
            info!(days_until = days, %target, "serving live forecast");
            let profile = self.forecast.fetch_day(target).await?;
            Ok(Resolved {
                result: shape_result(WeatherSource::Forecast, target, venue_name, profile, now),
                cache: CachePolicy::FORECAST,
            })
        } else {
            info!(days_until = days, %target, "outside forecast window, using historical average");
            let profile = match history::averaged_profile(self.archive.as_ref(), target).await {
                Some(profile) => profile,
                None => {
                    warn!(%target, "no archive year succeeded, serving synthetic fallback profile");
                    fallback::synthetic_profile(target)
                }
            };
            Ok(Resolved {
                result: shape_result(WeatherSource::Historical, target, venue_name, profile, now),
                cache: CachePolicy::HISTORICAL,
            })
        }
    }
}

fn shape_result(
    source: WeatherSource,
    date: chrono::NaiveDate,
    venue_name: String,
    profile: DayProfile,
    now: DateTime<Utc>,
) -> WeatherResult {
    WeatherResult {
        source,
        date,
        venue_name,
        hourly: profile.hourly,
        daily: Some(profile.daily),
        updated_at: now,
    }
}

/// Whole days until the wedding, rounded up. A wedding later today (or
/// earlier today) is day 0 or 1; past dates go negative.
fn days_until(now: NaiveDateTime, wedding: NaiveDateTime) -> i64 {
    let secs = (wedding - now).num_seconds();
    (secs as f64 / 86_400.0).ceil() as i64
}
