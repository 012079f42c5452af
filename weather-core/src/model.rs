use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::WindSpeeds;

pub const DEFAULT_CONDITION: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "Weather information unavailable";
pub const DEFAULT_ICON: &str = "01d";

/// Latitude/longitude pair a provider is queried with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Temperatures of one response, all in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TemperatureSnapshot {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Default for WeatherCondition {
    fn default() -> Self {
        Self {
            main: DEFAULT_CONDITION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// Wind as reported upstream: speed in m/s, direction in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WindReading {
    pub speed: f64,
    pub deg: f64,
    pub gust: f64,
}

/// Humidity (%) and pressure (hPa).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Atmosphere {
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Place {
    pub name: String,
    pub country: String,
}

impl Place {
    /// "Berlin, DE", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Everything the current-conditions panel shows, extracted from a
/// response that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub place: Place,
    pub temperature: TemperatureSnapshot,
    pub condition: WeatherCondition,
    pub wind: WindReading,
    pub wind_speeds: WindSpeeds,
    pub atmosphere: Atmosphere,
}

/// Local calendar day a forecast sample falls on.
///
/// Two samples share a day iff both the weekday and the day of month match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayKey {
    pub weekday: Weekday,
    pub day: u32,
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.weekday, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastSummary {
    pub day_key: DayKey,
    pub weekday_label: String,
    pub day_of_month: u32,
    pub min_temp: f64,
    pub max_temp: f64,
    pub representative_icon: String,
    pub dominant_condition: String,
}

/// Coarse time-of-day bucket used to tint the hourly strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Night,
    MorningEvening,
    Day,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        if !(6..18).contains(&hour) {
            Self::Night
        } else if !(10..16).contains(&hour) {
            Self::MorningEvening
        } else {
            Self::Day
        }
    }
}

/// One untouched 3-hour sample, projected for the short-range timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySlot {
    pub timestamp: i64,
    pub time_label: String,
    pub hour: u32,
    pub icon: String,
    pub condition: String,
    pub temp: f64,
    pub wind_deg: f64,
    /// m/s, as reported.
    pub wind_speed: f64,
    pub wind_speed_kmh: f64,
    pub period: DayPeriod,
}
