use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

const MPS_TO_KNOTS: f64 = 1.94384;
const MPS_TO_KMH: f64 = 3.6;
const BEAUFORT_FACTOR: f64 = 0.836;

/// Temperature unit preference. Upstream data is always metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_use_celsius(use_celsius: bool) -> Self {
        if use_celsius { Self::Celsius } else { Self::Fahrenheit }
    }

    pub fn is_celsius(&self) -> bool {
        matches!(self, Self::Celsius)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" | "metric" => Ok(Self::Celsius),
            "f" | "fahrenheit" | "imperial" => Ok(Self::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Which entry of a [`WindSpeeds`] bundle to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindUnit {
    #[default]
    Beaufort,
    Knots,
    Kmh,
    Ms,
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beaufort => "bft",
            Self::Knots => "knots",
            Self::Kmh => "kmh",
            Self::Ms => "ms",
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WindUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "bft" | "beaufort" => Ok(Self::Beaufort),
            "kn" | "kt" | "knots" => Ok(Self::Knots),
            "kmh" | "km/h" => Ok(Self::Kmh),
            "ms" | "m/s" => Ok(Self::Ms),
            _ => Err(anyhow::anyhow!(
                "Unknown wind unit '{value}'. Supported units: bft, knots, kmh, ms."
            )),
        }
    }
}

impl FromStr for WindUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// A converted value together with its ready-to-print form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    pub value: f64,
    pub display: String,
}

/// Wind speed expressed in every supported unit at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindSpeeds {
    pub beaufort: Measure,
    pub knots: Measure,
    pub kmh: Measure,
    pub ms: Measure,
}

impl WindSpeeds {
    /// Build the bundle from a speed in m/s. Non-finite input counts as calm.
    pub fn from_mps(speed: f64) -> Self {
        let speed = if speed.is_finite() { speed } else { 0.0 };

        let beaufort = round_half_up((speed / BEAUFORT_FACTOR).powi(2).cbrt());
        let knots = round_half_up(speed * MPS_TO_KNOTS);
        let kmh = round_half_up(speed * MPS_TO_KMH);

        Self {
            beaufort: Measure { value: beaufort, display: format!("{beaufort} Bft") },
            knots: Measure { value: knots, display: format!("{knots} knots") },
            kmh: Measure { value: kmh, display: format!("{kmh} km/h") },
            ms: Measure { value: speed, display: format!("{speed} m/s") },
        }
    }

    pub fn get(&self, unit: WindUnit) -> &Measure {
        match unit {
            WindUnit::Beaufort => &self.beaufort,
            WindUnit::Knots => &self.knots,
            WindUnit::Kmh => &self.kmh,
            WindUnit::Ms => &self.ms,
        }
    }
}

/// Convert a Celsius reading to the unit the user asked for. No rounding.
pub fn to_display_unit(celsius: f64, use_celsius: bool) -> f64 {
    if use_celsius { celsius } else { celsius * 9.0 / 5.0 + 32.0 }
}

/// m/s to km/h, rounded for display.
pub fn mps_to_kmh(speed: f64) -> f64 {
    let speed = if speed.is_finite() { speed } else { 0.0 };
    round_half_up(speed * MPS_TO_KMH)
}

/// Round to the nearest integer with halves going up (`-2.5` becomes `-2`),
/// and never produce a negative zero.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}
