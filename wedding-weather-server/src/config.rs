use std::{env, path::PathBuf};

use tracing::info;

pub struct Config {
    pub port: u16,
    /// Explicit settings-file location for deployments; falls back to
    /// the platform config dir when unset.
    pub settings_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: load_port(),
            settings_path: env::var("WEDDING_WEATHER_SETTINGS").ok().map(PathBuf::from),
        }
    }
}

fn load_port() -> u16 {
    const DEFAULT: u16 = 3000;

    match env::var("WEDDING_WEATHER_PORT") {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            info!("Invalid WEDDING_WEATHER_PORT value ({e}), using default: {DEFAULT}");
            DEFAULT
        }),
        Err(_) => {
            info!("WEDDING_WEATHER_PORT not set, using default: {DEFAULT}");
            DEFAULT
        }
    }
}
