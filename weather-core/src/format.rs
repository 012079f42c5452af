use crate::model::DailyForecastSummary;
use crate::units::{round_half_up, to_display_unit};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// `"22°C"` / `"71°F"`: converted first, rounded second.
pub fn format_temperature(celsius: f64, use_celsius: bool) -> String {
    let value = round_half_up(to_display_unit(finite_or_zero(celsius), use_celsius));
    let symbol = if use_celsius { 'C' } else { 'F' };

    format!("{value}°{symbol}")
}

pub fn format_humidity(humidity: f64) -> String {
    format!("{}%", round_half_up(finite_or_zero(humidity)))
}

pub fn format_pressure(pressure: f64) -> String {
    format!("{} hPa", round_half_up(finite_or_zero(pressure)))
}

/// "Tue 21"
pub fn format_day_label(day: &DailyForecastSummary) -> String {
    format!("{} {}", day.weekday_label, day.day_of_month)
}

/// 16-point compass direction the wind blows from.
pub fn compass_point(deg: f64) -> &'static str {
    let deg = finite_or_zero(deg).rem_euclid(360.0);
    let index = (deg / 22.5 + 0.5).floor() as usize % COMPASS_POINTS.len();

    COMPASS_POINTS[index]
}

pub fn icon_url(code: &str) -> String {
    icon_url_sized(code, 4)
}

pub fn icon_url_sized(code: &str, scale: u8) -> String {
    format!("{ICON_BASE_URL}/{code}@{scale}x.png")
}
