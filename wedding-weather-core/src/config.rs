use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::WeatherError;

/// Venue constants. The venue is fixed per deployment, so its
/// coordinates and timezone are compile-time constants rather than
/// configuration. The fallback profile constants in `fallback.rs` are
/// calibrated to this location; both must move together if the venue
/// ever changes.
pub const VENUE_LATITUDE: f64 = 27.7676;
pub const VENUE_LONGITUDE: f64 = -82.6403;
pub const VENUE_TZ: Tz = chrono_tz::America::New_York;

const DEFAULT_VENUE_NAME: &str = "Sunken Gardens, St. Petersburg";

/// Read access to the two site-settings fields this component consumes.
///
/// The admin dashboard owns the rest of the settings record; the weather
/// resolver only ever needs these typed getters and must not care how
/// the record is persisted.
pub trait SettingsStore: Send + Sync {
    /// Venue-local wedding date/time, or `None` when not configured.
    ///
    /// # Errors
    /// Returns [`WeatherError::InvalidWeddingDate`] when a stored value
    /// exists but cannot be parsed.
    fn wedding_date(&self) -> Result<Option<NaiveDateTime>, WeatherError>;

    fn venue_name(&self) -> String;
}

/// Site settings persisted as TOML, one logical record per deployment.
///
/// Example:
/// ```toml
/// wedding_date = "2026-10-17T16:30"
/// venue_name = "Sunken Gardens, St. Petersburg"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// ISO date or date-time string; absent means "not configured".
    pub wedding_date: Option<String>,
    pub venue_name: Option<String>,
}

impl Settings {
    /// Load settings from the platform config dir, or return an empty
    /// default on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_file_path()?)
    }

    /// Load settings from an explicit path (server deployments point
    /// this at a mounted file).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wedding-weather", "wedding-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}

impl SettingsStore for Settings {
    fn wedding_date(&self) -> Result<Option<NaiveDateTime>, WeatherError> {
        match self.wedding_date.as_deref() {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_wedding_date(s).map(Some),
        }
    }

    fn venue_name(&self) -> String {
        self.venue_name
            .clone()
            .unwrap_or_else(|| DEFAULT_VENUE_NAME.to_string())
    }
}

/// Parse a stored wedding date into a venue-local date/time.
///
/// Accepts RFC 3339 (converted into the venue timezone), a naive
/// `YYYY-MM-DDTHH:MM[:SS]`, or a bare `YYYY-MM-DD` (midnight).
pub fn parse_wedding_date(s: &str) -> Result<NaiveDateTime, WeatherError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&VENUE_TZ).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(WeatherError::InvalidWeddingDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn unset_wedding_date_is_none_not_an_error() {
        let settings = Settings::default();
        assert!(settings.wedding_date().unwrap().is_none());

        let blank = Settings {
            wedding_date: Some("  ".into()),
            ..Settings::default()
        };
        assert!(blank.wedding_date().unwrap().is_none());
    }

    #[test]
    fn date_only_string_resolves_to_midnight() {
        let dt = parse_wedding_date("2026-10-17").unwrap();
        assert_eq!(dt.date().day(), 17);
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn naive_datetime_strings_parse() {
        let dt = parse_wedding_date("2026-10-17T16:30").unwrap();
        assert_eq!(dt.hour(), 16);
        assert_eq!(dt.minute(), 30);

        let dt = parse_wedding_date("2026-10-17T16:30:45").unwrap();
        assert_eq!(dt.second(), 45);
    }

    #[test]
    fn rfc3339_converts_to_venue_local_time() {
        // 20:30 UTC on an EDT date is 16:30 at the venue.
        let dt = parse_wedding_date("2026-10-17T20:30:00Z").unwrap();
        assert_eq!(dt.hour(), 16);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn garbage_dates_yield_a_typed_error() {
        let err = parse_wedding_date("next summer").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidWeddingDate(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn venue_name_falls_back_to_default() {
        let settings = Settings::default();
        assert_eq!(settings.venue_name(), DEFAULT_VENUE_NAME);

        let named = Settings {
            venue_name: Some("Elsewhere".into()),
            ..Settings::default()
        };
        assert_eq!(named.venue_name(), "Elsewhere");
    }

    #[test]
    fn settings_roundtrip_through_toml() {
        let settings = Settings {
            wedding_date: Some("2026-10-17T16:30".into()),
            venue_name: Some("Sunken Gardens".into()),
        };

        let toml = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&toml).unwrap();

        assert_eq!(back.wedding_date, settings.wedding_date);
        assert_eq!(back.venue_name, settings.venue_name);
    }
}
