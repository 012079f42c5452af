//! Projections of a raw current-weather response.
//!
//! [`is_valid_weather_data`] is the single gate deciding whether a response
//! is renderable. The `extract_*` functions never fail: called on anything,
//! including invalid input, they return default-filled values.

use serde_json::Value;

use crate::access::{self, lookup, non_empty_array, number, text};
use crate::model::{
    Atmosphere, CurrentConditions, DEFAULT_CONDITION, DEFAULT_DESCRIPTION, DEFAULT_ICON, Place,
    TemperatureSnapshot, WeatherCondition, WindReading,
};
use crate::units::WindSpeeds;

/// True iff `raw` has a `main` object with a numeric `temp` and a non-empty
/// `weather` array.
pub fn is_valid_weather_data(raw: &Value) -> bool {
    let has_main = lookup(raw, "main").is_some_and(Value::is_object);
    let has_weather = non_empty_array(raw, "weather");
    let has_temp = lookup(raw, "main.temp").is_some_and(Value::is_number);

    has_main && has_weather && has_temp
}

pub fn extract_temperature_data(raw: &Value) -> TemperatureSnapshot {
    TemperatureSnapshot {
        current: number(raw, "main.temp", 0.0),
        min: number(raw, "main.temp_min", 0.0),
        max: number(raw, "main.temp_max", 0.0),
        feels_like: number(raw, "main.feels_like", 0.0),
    }
}

pub fn extract_weather_condition(raw: &Value) -> WeatherCondition {
    let weather = access::extract(raw, "weather.0", &Value::Null);

    WeatherCondition {
        main: text(weather, "main", DEFAULT_CONDITION),
        description: text(weather, "description", DEFAULT_DESCRIPTION),
        icon: text(weather, "icon", DEFAULT_ICON),
    }
}

pub fn extract_wind_data(raw: &Value) -> WindReading {
    WindReading {
        speed: number(raw, "wind.speed", 0.0),
        deg: number(raw, "wind.deg", 0.0),
        gust: number(raw, "wind.gust", 0.0),
    }
}

pub fn extract_atmosphere(raw: &Value) -> Atmosphere {
    Atmosphere {
        humidity: number(raw, "main.humidity", 0.0),
        pressure: number(raw, "main.pressure", 0.0),
    }
}

pub fn extract_place(raw: &Value) -> Place {
    Place {
        name: text(raw, "name", ""),
        country: text(raw, "sys.country", ""),
    }
}

/// City block of a forecast response.
pub fn extract_forecast_place(raw: &Value) -> Place {
    Place {
        name: text(raw, "city.name", ""),
        country: text(raw, "city.country", ""),
    }
}

impl CurrentConditions {
    /// Validate `raw` and project it. `None` means "invalid data received".
    pub fn from_response(raw: &Value) -> Option<Self> {
        if !is_valid_weather_data(raw) {
            tracing::debug!("current weather response failed validation");
            return None;
        }

        let wind = extract_wind_data(raw);

        Some(Self {
            place: extract_place(raw),
            temperature: extract_temperature_data(raw),
            condition: extract_weather_condition(raw),
            wind_speeds: WindSpeeds::from_mps(wind.speed),
            wind,
            atmosphere: extract_atmosphere(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn berlin() -> Value {
        json!({
            "name": "Berlin",
            "sys": { "country": "DE" },
            "main": {
                "temp": 18.4,
                "temp_min": 16.1,
                "temp_max": 20.2,
                "feels_like": 17.9,
                "humidity": 62,
                "pressure": 1014
            },
            "weather": [{ "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
            "wind": { "speed": 4.6, "deg": 250, "gust": 7.2 }
        })
    }

    #[test]
    fn empty_object_is_invalid() {
        assert!(!is_valid_weather_data(&json!({})));
        assert!(!is_valid_weather_data(&Value::Null));
    }

    #[test]
    fn minimal_payload_is_valid() {
        let raw = json!({ "main": { "temp": 20 }, "weather": [{ "main": "Clear" }] });
        assert!(is_valid_weather_data(&raw));
    }

    #[test]
    fn validation_rejects_each_missing_piece() {
        assert!(!is_valid_weather_data(&json!({ "main": null, "weather": [{}] })));
        assert!(!is_valid_weather_data(&json!({ "main": { "temp": 1 }, "weather": [] })));
        assert!(!is_valid_weather_data(&json!({ "main": { "temp": 1 }, "weather": {} })));
        assert!(!is_valid_weather_data(&json!({ "main": { "temp": "1" }, "weather": [{}] })));
        assert!(!is_valid_weather_data(&json!({ "main": [1], "weather": [{}] })));
    }

    #[test]
    fn full_payload_extraction() {
        let raw = berlin();

        let t = extract_temperature_data(&raw);
        assert_eq!(t.current, 18.4);
        assert_eq!(t.min, 16.1);
        assert_eq!(t.max, 20.2);
        assert_eq!(t.feels_like, 17.9);

        let c = extract_weather_condition(&raw);
        assert_eq!(c.main, "Clouds");
        assert_eq!(c.description, "broken clouds");
        assert_eq!(c.icon, "04d");

        let w = extract_wind_data(&raw);
        assert_eq!(w, WindReading { speed: 4.6, deg: 250.0, gust: 7.2 });

        assert_eq!(extract_place(&raw).label(), "Berlin, DE");
        assert_eq!(extract_atmosphere(&raw), Atmosphere { humidity: 62.0, pressure: 1014.0 });
    }

    #[test]
    fn extraction_from_garbage_is_default_filled() {
        for raw in [Value::Null, json!({}), json!([]), json!("oops"), json!({ "main": 5, "weather": "x" })] {
            assert_eq!(extract_temperature_data(&raw), TemperatureSnapshot::default());
            assert_eq!(extract_weather_condition(&raw), WeatherCondition::default());
            assert_eq!(extract_wind_data(&raw), WindReading::default());
            assert_eq!(extract_place(&raw), Place::default());
        }
    }

    #[test]
    fn partially_missing_condition_fields_fall_back_individually() {
        let raw = json!({ "weather": [{ "main": "Rain", "icon": null }] });
        let c = extract_weather_condition(&raw);

        assert_eq!(c.main, "Rain");
        assert_eq!(c.description, "Weather information unavailable");
        assert_eq!(c.icon, "01d");
    }

    #[test]
    fn current_conditions_gate_on_validation() {
        assert!(CurrentConditions::from_response(&json!({ "name": "Nowhere" })).is_none());

        let current = CurrentConditions::from_response(&berlin()).expect("valid payload");
        assert_eq!(current.wind_speeds.beaufort.display, "3 Bft");
        assert_eq!(current.place.name, "Berlin");
    }

    #[test]
    fn forecast_place_reads_city_block() {
        let raw = json!({ "city": { "name": "Lyon", "country": "FR" }, "list": [] });
        assert_eq!(extract_forecast_place(&raw).label(), "Lyon, FR");
    }
}
