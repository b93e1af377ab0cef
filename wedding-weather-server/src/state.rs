use std::path::PathBuf;

use anyhow::Result;
use wedding_weather_core::{Settings, WeatherResolver};

use crate::config::Config;

pub struct AppState {
    pub resolver: WeatherResolver,
    settings_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: WeatherResolver::open_meteo(),
            settings_path: config.settings_path.clone(),
        }
    }

    /// Settings are re-read on every request so admin edits take effect
    /// without a restart.
    pub fn load_settings(&self) -> Result<Settings> {
        match &self.settings_path {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }
}
