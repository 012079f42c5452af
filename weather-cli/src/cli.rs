use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weather_core::{
    Config, SavedLocation, TemperatureUnit, WeatherError, WeatherView, WindUnit, fetch_report,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the preferred temperature unit.
    Configure,

    /// Switch between Celsius and Fahrenheit.
    Units {
        /// "celsius" or "fahrenheit".
        unit: TemperatureUnit,
    },

    /// Manage saved locations.
    Locations {
        #[command(subcommand)]
        action: LocationsCommand,
    },

    /// Show current conditions and the forecast.
    Show {
        /// Name of a saved location; defaults to the default location.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,

        /// Latitude of an ad-hoc location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude of an ad-hoc location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<String>,

        /// Wind speed unit: bft, knots, kmh or ms.
        #[arg(long, default_value = "bft")]
        wind: WindUnit,

        /// How many 3-hour samples of the hourly strip to print (max 24).
        #[arg(long, default_value_t = 8)]
        hours: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List saved locations; the default one is starred.
    List,

    /// Save a location.
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        lat: String,
        #[arg(allow_hyphen_values = true)]
        lon: String,
    },

    /// Forget a saved location.
    Remove { name: String },

    /// Make a saved location the default.
    Default { name: String },

    /// Stop using a default location.
    ClearDefault,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Units { unit } => {
                let mut config = Config::load()?;
                config.set_temperature_unit(unit);
                config.save()?;
                println!("Temperatures will be shown in {unit}.");
                Ok(())
            }
            Command::Locations { action } => locations(action),
            Command::Show { location, lat, lon, wind, hours } => {
                show(location, lat, lon, wind, hours).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key (leave empty to keep the current one):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let starting = TemperatureUnit::all()
        .iter()
        .position(|u| *u == config.temperature_unit())
        .unwrap_or(0);
    let unit = Select::new("Temperature unit:", TemperatureUnit::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()
        .context("Failed to read temperature unit")?;
    config.set_temperature_unit(unit);

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn locations(action: LocationsCommand) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match action {
        LocationsCommand::List => {
            print!("{}", render::render_locations(&config));
            return Ok(());
        }
        LocationsCommand::Add { name, lat, lon } => {
            let location = SavedLocation::parse(&name, &lat, &lon)?;
            config.add_location(location)?;
            println!("Saved {name}.");
        }
        LocationsCommand::Remove { name } => {
            let location = config.find_location(&name)?.clone();
            let was_default = config.remove_location(location.latitude, location.longitude)?;
            if was_default {
                println!("Removed {}. Default location has been cleared.", location.name);
            } else {
                println!("Removed {}.", location.name);
            }
        }
        LocationsCommand::Default { name } => {
            let location = config.find_location(&name)?.clone();
            println!("{} set as default location.", location.name);
            config.set_default_location(location);
        }
        LocationsCommand::ClearDefault => {
            config.clear_default_location();
            println!("Default location cleared.");
        }
    }

    config.save()
}

async fn show(
    location: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
    wind: WindUnit,
    hours: usize,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    let selected = match (location, lat, lon) {
        (Some(name), _, _) => Some(config.find_location(&name)?.clone()),
        (None, Some(lat), Some(lon)) => Some(SavedLocation::parse("", &lat, &lon)?),
        _ => None,
    };
    let location = config.resolve_location(selected)?;
    tracing::debug!(name = %location.name, coords = %location.coordinates(), "resolved location");
    let provider = provider_from_config(&config)?;

    let report = fetch_report(provider.as_ref(), &location.coordinates()).await?;
    let view = WeatherView::from_report(&report, &Local::now());

    if !view.is_renderable() {
        return Err(WeatherError::InvalidPayload.into());
    }

    let options = render::RenderOptions { use_celsius: config.use_celsius(), wind, hours };
    print!("{}", render::render_view(&view, &location, &options));
    Ok(())
}
