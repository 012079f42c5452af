use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::Display;

use crate::{
    forecast::{daily_summaries, hourly_strip},
    model::{CurrentConditions, DailyForecastSummary, HourlySlot, Place},
    provider::Report,
    snapshot::extract_forecast_place,
};

/// Display-ready state derived from one [`Report`].
///
/// Rebuilt wholesale for every report; never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    /// `None` when the current-weather body failed validation.
    pub current: Option<CurrentConditions>,
    pub forecast_place: Option<Place>,
    pub hourly: Vec<HourlySlot>,
    pub daily: Vec<DailyForecastSummary>,
}

impl WeatherView {
    pub fn from_report<Tz>(report: &Report, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let current = CurrentConditions::from_response(&report.current);

        let (forecast_place, hourly, daily) = match &report.forecast {
            Some(body) => (
                Some(extract_forecast_place(body)),
                hourly_strip(body, &now.timezone()),
                daily_summaries(body, now),
            ),
            None => (None, Vec::new(), Vec::new()),
        };

        Self { current, forecast_place, hourly, daily }
    }

    pub fn is_renderable(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn missing_forecast_leaves_current_conditions_intact() {
        let report = Report {
            current: json!({ "main": { "temp": 3.0 }, "weather": [{ "main": "Snow" }] }),
            forecast: None,
        };

        let view = WeatherView::from_report(&report, &Utc::now());

        assert!(view.is_renderable());
        assert!(view.hourly.is_empty());
        assert!(view.daily.is_empty());
        assert!(view.forecast_place.is_none());
    }

    #[test]
    fn invalid_current_body_is_not_renderable() {
        let report = Report { current: json!({}), forecast: Some(json!({ "list": [] })) };

        let view = WeatherView::from_report(&report, &Utc::now());

        assert!(!view.is_renderable());
        assert_eq!(view.forecast_place, Some(Place::default()));
    }
}
