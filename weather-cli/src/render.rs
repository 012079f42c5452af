use std::fmt::Write;

use weather_core::{
    Config, CurrentConditions, DailyForecastSummary, HourlySlot, SavedLocation, WeatherView,
    WindSpeeds, WindUnit,
    format::{
        compass_point, format_day_label, format_humidity, format_pressure, format_temperature,
        icon_url,
    },
};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub use_celsius: bool,
    pub wind: WindUnit,
    pub hours: usize,
}

pub fn render_view(view: &WeatherView, location: &SavedLocation, opts: &RenderOptions) -> String {
    let mut out = String::new();

    if let Some(current) = &view.current {
        render_current(&mut out, current, location, opts);
    }

    let hours = opts.hours.min(view.hourly.len());
    if hours > 0 {
        out.push_str("\nNext hours\n");
        for slot in &view.hourly[..hours] {
            render_slot(&mut out, slot, opts);
        }
    }

    if !view.daily.is_empty() {
        out.push_str("\n5-Day Forecast\n");
        for day in &view.daily {
            render_day(&mut out, day, opts);
        }
    } else if view.hourly.is_empty() {
        out.push_str("\nForecast unavailable.\n");
    }

    out
}

fn render_current(
    out: &mut String,
    current: &CurrentConditions,
    location: &SavedLocation,
    opts: &RenderOptions,
) {
    let c = opts.use_celsius;
    let t = &current.temperature;

    let title = if current.place.name.is_empty() {
        location.name.clone()
    } else {
        current.place.label()
    };
    let title = if title.is_empty() { location.coordinates().to_string() } else { title };

    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "  {}  {}",
        format_temperature(t.current, c),
        current.condition.description
    );
    let _ = writeln!(
        out,
        "  Min: {}  Max: {}  Feels like: {}",
        format_temperature(t.min, c),
        format_temperature(t.max, c),
        format_temperature(t.feels_like, c),
    );
    let _ = writeln!(
        out,
        "  Wind: {} {} ({}°)  Humidity: {}  Pressure: {}",
        current.wind_speeds.get(opts.wind).display,
        compass_point(current.wind.deg),
        current.wind.deg,
        format_humidity(current.atmosphere.humidity),
        format_pressure(current.atmosphere.pressure),
    );
    let _ = writeln!(out, "  Icon: {}", icon_url(&current.condition.icon));
}

fn render_slot(out: &mut String, slot: &HourlySlot, opts: &RenderOptions) {
    let wind = WindSpeeds::from_mps(slot.wind_speed);

    let _ = writeln!(
        out,
        "  {:<9} {:<13} {:>6}  {} {}",
        slot.time_label,
        slot.condition,
        format_temperature(slot.temp, opts.use_celsius),
        wind.get(opts.wind).display,
        compass_point(slot.wind_deg),
    );
}

fn render_day(out: &mut String, day: &DailyForecastSummary, opts: &RenderOptions) {
    let _ = writeln!(
        out,
        "  {:<7} {:<13} {:>6} / {}",
        format_day_label(day),
        day.dominant_condition,
        format_temperature(day.min_temp, opts.use_celsius),
        format_temperature(day.max_temp, opts.use_celsius),
    );
}

pub fn render_locations(config: &Config) -> String {
    if config.saved_locations.is_empty() {
        return "No saved locations. Add one with `weather locations add <name> <lat> <lon>`.\n"
            .to_string();
    }

    let mut out = String::new();
    for location in &config.saved_locations {
        let marker = if config.is_default(location) { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {} ({})", location.name, location.coordinates());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;
    use weather_core::Report;

    fn opts() -> RenderOptions {
        RenderOptions { use_celsius: true, wind: WindUnit::Kmh, hours: 2 }
    }

    fn home() -> SavedLocation {
        SavedLocation { name: "Home".into(), latitude: 40.4, longitude: -3.7 }
    }

    fn view(with_forecast: bool) -> WeatherView {
        let tz = FixedOffset::east_opt(0).expect("utc offset");
        let now = tz.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let tomorrow_noon = tz.with_ymd_and_hms(2024, 7, 2, 12, 0, 0).unwrap().timestamp();

        let forecast = json!({ "list": [{
            "dt": tomorrow_noon,
            "main": { "temp": 34.0 },
            "weather": [{ "main": "Clear", "icon": "01d" }],
            "wind": { "speed": 5.0, "deg": 0 }
        }]});

        let report = Report {
            current: json!({
                "name": "Madrid",
                "sys": { "country": "ES" },
                "main": { "temp": 31.6, "temp_min": 29.0, "temp_max": 33.2, "feels_like": 30.1,
                          "humidity": 20, "pressure": 1016 },
                "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "wind": { "speed": 2.0, "deg": 90 }
            }),
            forecast: with_forecast.then_some(forecast),
        };
        WeatherView::from_report(&report, &now)
    }

    #[test]
    fn current_block_uses_place_label_and_chosen_wind_unit() {
        let out = render_view(&view(false), &home(), &opts());

        assert!(out.starts_with("Madrid, ES\n"));
        assert!(out.contains("32°C  clear sky"));
        assert!(out.contains("Wind: 7 km/h E (90°)"));
        assert!(out.contains("Humidity: 20%"));
        assert!(out.contains("Pressure: 1016 hPa"));
        assert!(out.contains("Forecast unavailable."));
    }

    #[test]
    fn forecast_sections_are_rendered() {
        let out = render_view(&view(true), &home(), &opts());

        assert!(out.contains("Next hours"));
        assert!(out.contains("12:00 PM"));
        assert!(out.contains("18 km/h N"));
        assert!(out.contains("5-Day Forecast"));
        assert!(out.contains("Tue 2"));
        assert!(out.contains("34°C / 34°C"));
    }

    #[test]
    fn fahrenheit_preference_applies_everywhere() {
        let opts = RenderOptions { use_celsius: false, ..opts() };
        let out = render_view(&view(true), &home(), &opts);

        assert!(out.contains("89°F  clear sky"));
        assert!(out.contains("93°F / 93°F"));
        assert!(!out.contains("°C"));
    }

    #[test]
    fn location_list_stars_the_default() {
        let mut config = Config::default();
        assert!(render_locations(&config).starts_with("No saved locations"));

        config.set_default_location(home());
        config
            .add_location(SavedLocation { name: "Work".into(), latitude: 1.0, longitude: 2.0 })
            .expect("add work");

        let out = render_locations(&config);
        assert!(out.contains("* Home (40.4000, -3.7000)"));
        assert!(out.contains("  Work (1.0000, 2.0000)"));
    }
}
