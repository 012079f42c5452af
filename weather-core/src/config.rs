use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::WeatherError, model::Coordinates, units::TemperatureUnit};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// A named place the user saved. Two locations are the same place when
/// their coordinates match, whatever they are called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SavedLocation {
    /// Build a location from user-typed coordinates.
    pub fn parse(name: &str, latitude: &str, longitude: &str) -> Result<Self, WeatherError> {
        let (latitude, longitude) = (latitude.trim(), longitude.trim());
        if latitude.is_empty() || longitude.is_empty() {
            return Err(WeatherError::InvalidCoordinates(
                "latitude and longitude are required".into(),
            ));
        }

        let parse = |raw: &str| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    WeatherError::InvalidCoordinates(format!("'{raw}' is not a number"))
                })
        };
        let (latitude, longitude) = (parse(latitude)?, parse(longitude)?);

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "latitude {latitude} is outside -90..90"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "longitude {longitude} is outside -180..180"
            )));
        }

        Ok(Self { name: name.trim().to_string(), latitude, longitude })
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates { latitude: self.latitude, longitude: self.longitude }
    }

    pub fn is_at(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude == latitude && self.longitude == longitude
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// temperature_unit = "celsius"
///
/// [default_location]
/// name = "Berlin"
/// latitude = 52.52
/// longitude = 13.405
///
/// [[saved_locations]]
/// name = "Berlin"
/// latitude = 52.52
/// longitude = 13.405
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    pub default_location: Option<SavedLocation>,

    #[serde(default)]
    pub saved_locations: Vec<SavedLocation>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            tracing::debug!(path = %path.display(), "no config file yet, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    pub fn use_celsius(&self) -> bool {
        self.temperature_unit.is_celsius()
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.temperature_unit = unit;
    }

    pub fn is_saved(&self, latitude: f64, longitude: f64) -> bool {
        self.saved_locations.iter().any(|loc| loc.is_at(latitude, longitude))
    }

    /// Append a location. Saving the same coordinates twice is an error.
    pub fn add_location(&mut self, location: SavedLocation) -> Result<(), WeatherError> {
        if self.is_saved(location.latitude, location.longitude) {
            return Err(WeatherError::DuplicateLocation {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }

        self.saved_locations.push(location);
        Ok(())
    }

    /// Make `location` the default, saving it too if it isn't yet.
    pub fn set_default_location(&mut self, location: SavedLocation) {
        if !self.is_saved(location.latitude, location.longitude) {
            self.saved_locations.push(location.clone());
        }
        self.default_location = Some(location);
    }

    pub fn clear_default_location(&mut self) {
        self.default_location = None;
    }

    /// Forget the location at the given coordinates.
    ///
    /// Returns `true` when it was also the default, which is cleared as well.
    pub fn remove_location(&mut self, latitude: f64, longitude: f64) -> Result<bool, WeatherError> {
        let before = self.saved_locations.len();
        self.saved_locations.retain(|loc| !loc.is_at(latitude, longitude));

        if self.saved_locations.len() == before {
            return Err(WeatherError::UnknownLocation(format!("{latitude}, {longitude}")));
        }

        let was_default = self
            .default_location
            .as_ref()
            .is_some_and(|loc| loc.is_at(latitude, longitude));
        if was_default {
            self.default_location = None;
        }

        Ok(was_default)
    }

    /// Case-insensitive lookup by name.
    pub fn find_location(&self, name: &str) -> Result<&SavedLocation, WeatherError> {
        let wanted = name.trim().to_lowercase();
        self.saved_locations
            .iter()
            .find(|loc| loc.name.to_lowercase() == wanted)
            .ok_or_else(|| WeatherError::UnknownLocation(name.to_string()))
    }

    pub fn is_default(&self, location: &SavedLocation) -> bool {
        self.default_location
            .as_ref()
            .is_some_and(|d| d.is_at(location.latitude, location.longitude))
    }

    /// The location a lookup should use: the explicitly selected one, else
    /// the default.
    pub fn resolve_location(&self, selected: Option<SavedLocation>) -> Result<SavedLocation> {
        selected.or_else(|| self.default_location.clone()).ok_or_else(|| {
            anyhow!(
                "No location selected and no default location configured.\n\
                 Hint: pass --location <name> or --lat/--lon, or run `weather locations default <name>`."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> SavedLocation {
        SavedLocation { name: "Berlin".into(), latitude: 52.52, longitude: 13.405 }
    }

    fn lima() -> SavedLocation {
        SavedLocation { name: "Lima".into(), latitude: -12.046, longitude: -77.043 }
    }

    #[test]
    fn defaults_to_celsius_with_nothing_saved() {
        let cfg = Config::default();

        assert_eq!(cfg.temperature_unit(), TemperatureUnit::Celsius);
        assert!(cfg.use_celsius());
        assert!(cfg.saved_locations.is_empty());
        assert!(cfg.default_location.is_none());
    }

    #[test]
    fn add_rejects_duplicate_coordinates() {
        let mut cfg = Config::default();
        cfg.add_location(berlin()).expect("first add succeeds");

        let renamed = SavedLocation { name: "Home".into(), ..berlin() };
        let err = cfg.add_location(renamed).unwrap_err();

        assert!(matches!(err, WeatherError::DuplicateLocation { .. }));
        assert_eq!(cfg.saved_locations.len(), 1);
    }

    #[test]
    fn set_default_also_saves_the_location() {
        let mut cfg = Config::default();
        cfg.set_default_location(berlin());

        assert!(cfg.is_saved(52.52, 13.405));
        assert!(cfg.is_default(&berlin()));

        // Setting it again doesn't duplicate it.
        cfg.set_default_location(berlin());
        assert_eq!(cfg.saved_locations.len(), 1);
    }

    #[test]
    fn removing_the_default_clears_it() {
        let mut cfg = Config::default();
        cfg.add_location(lima()).expect("add lima");
        cfg.set_default_location(berlin());

        let cleared = cfg.remove_location(52.52, 13.405).expect("berlin is saved");

        assert!(cleared);
        assert!(cfg.default_location.is_none());
        assert_eq!(cfg.saved_locations, vec![lima()]);
    }

    #[test]
    fn removing_another_location_keeps_the_default() {
        let mut cfg = Config::default();
        cfg.add_location(lima()).expect("add lima");
        cfg.set_default_location(berlin());

        let cleared = cfg.remove_location(-12.046, -77.043).expect("lima is saved");

        assert!(!cleared);
        assert_eq!(cfg.default_location, Some(berlin()));
    }

    #[test]
    fn removing_unknown_location_errors() {
        let mut cfg = Config::default();
        let err = cfg.remove_location(1.0, 2.0).unwrap_err();
        assert!(matches!(err, WeatherError::UnknownLocation(_)));
    }

    #[test]
    fn find_location_ignores_case() {
        let mut cfg = Config::default();
        cfg.add_location(berlin()).expect("add berlin");

        assert_eq!(cfg.find_location("bErLiN ").expect("found"), &berlin());
        assert!(cfg.find_location("Paris").is_err());
    }

    #[test]
    fn selected_location_wins_over_default() {
        let mut cfg = Config::default();
        let err = cfg.resolve_location(None).unwrap_err();
        assert!(err.to_string().contains("No location selected"));

        cfg.set_default_location(berlin());
        assert_eq!(cfg.resolve_location(None).expect("default"), berlin());
        assert_eq!(cfg.resolve_location(Some(lima())).expect("selected"), lima());
    }

    #[test]
    fn parse_validates_coordinates() {
        let loc = SavedLocation::parse(" Quito ", "-0.18", " -78.47").expect("valid");
        assert_eq!(loc.name, "Quito");
        assert_eq!(loc.coordinates(), Coordinates { latitude: -0.18, longitude: -78.47 });

        assert!(SavedLocation::parse("x", "", "1").is_err());
        assert!(SavedLocation::parse("x", "north", "1").is_err());
        assert!(SavedLocation::parse("x", "91", "1").is_err());
        assert!(SavedLocation::parse("x", "1", "-181").is_err());
        assert!(SavedLocation::parse("x", "NaN", "1").is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_temperature_unit(TemperatureUnit::Fahrenheit);
        cfg.add_location(lima()).expect("add lima");
        cfg.set_default_location(berlin());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.temperature_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(loaded.saved_locations, vec![lima(), berlin()]);
        assert_eq!(loaded.default_location, Some(berlin()));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn garbage_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "temperature_unit = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
