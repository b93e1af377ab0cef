use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::Text;

use wedding_weather_core::{
    Settings, SettingsStore, WeatherResolver, WeatherSource, config::parse_wedding_date,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wedding-weather", version, about = "Wedding-day weather admin tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the wedding date and venue name interactively.
    Configure,

    /// Resolve and print the wedding-day weather.
    Show {
        /// Print the raw JSON payload instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { json } => show(json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;

    let current = settings.wedding_date.clone().unwrap_or_default();
    let date = Text::new("Wedding date (YYYY-MM-DD or YYYY-MM-DDTHH:MM, blank to clear):")
        .with_initial_value(&current)
        .prompt()?;

    let date = date.trim();
    if date.is_empty() {
        settings.wedding_date = None;
    } else {
        // Validate before persisting so the server never sees garbage.
        parse_wedding_date(date)?;
        settings.wedding_date = Some(date.to_string());
    }

    let venue = Text::new("Venue name:")
        .with_initial_value(&settings.venue_name())
        .prompt()?;
    settings.venue_name = Some(venue.trim().to_string());

    settings.save()?;
    println!(
        "Saved settings to {}",
        Settings::settings_file_path()?.display()
    );

    Ok(())
}

async fn show(json: bool) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let resolver = WeatherResolver::open_meteo();

    let resolved = resolver
        .resolve(Utc::now(), &settings)
        .await
        .context("Could not resolve wedding-day weather")?;
    let result = &resolved.result;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let source = match result.source {
        WeatherSource::Forecast => "live forecast",
        WeatherSource::Historical => "historical average",
    };
    println!("{} at {} ({source})", result.date, result.venue_name);

    if let Some(daily) = &result.daily {
        println!(
            "High {:.0}°F / Low {:.0}°F, rain up to {:.0}%, {}",
            daily.temperature_max,
            daily.temperature_min,
            daily.precipitation_probability_max,
            daily.weather_code.description(),
        );
        if let (Some(sunrise), Some(sunset)) = (&daily.sunrise, &daily.sunset) {
            println!("Sunrise {sunrise}  Sunset {sunset}");
        }
    }

    println!();
    for point in result.hourly.iter().filter(|p| p.hour % 3 == 0) {
        println!(
            "{:>5}  {:>3.0}°F  rain {:>3.0}%  wind {:>2.0} mph  {}",
            point.time,
            point.temperature,
            point.precipitation_probability,
            point.wind_speed,
            point.weather_code.description(),
        );
    }

    Ok(())
}
