//! Daily summaries and the hourly strip built from a 5-day/3-hour forecast.
//!
//! Samples are grouped by *local* calendar day of the timezone the caller
//! passes in (the device timezone in the CLI, a fixed offset in tests). The
//! current day is never summarised.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde_json::Value;
use std::fmt::Display;

use crate::access::{lookup, maybe_number, non_empty_array, number, text};
use crate::model::{
    DEFAULT_CONDITION, DEFAULT_ICON, DailyForecastSummary, DayKey, DayPeriod, HourlySlot,
};
use crate::units::mps_to_kmh;

/// Maximum number of daily summaries returned.
pub const MAX_DAYS: usize = 5;
/// Number of raw samples exposed on the hourly strip.
pub const HOURLY_SAMPLES: usize = 24;

const DAYTIME_HOURS: std::ops::RangeInclusive<u32> = 10..=14;

struct DayGroup<'a, Tz: TimeZone> {
    key: DayKey,
    first_seen: DateTime<Tz>,
    samples: Vec<(&'a Value, DateTime<Tz>)>,
}

fn samples(raw: &Value) -> &[Value] {
    lookup(raw, "list")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn has_weather(sample: &Value) -> bool {
    non_empty_array(sample, "weather")
}

fn sample_time<Tz: TimeZone>(sample: &Value, tz: &Tz) -> Option<DateTime<Tz>> {
    let dt = lookup(sample, "dt")?;
    let secs = dt.as_i64().or_else(|| dt.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;

    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(tz))
}

fn day_key<Tz: TimeZone>(at: &DateTime<Tz>) -> DayKey {
    DayKey { weekday: at.weekday(), day: at.day() }
}

/// Group `raw.list` into per-day summaries, skipping the day `now` falls on.
///
/// Days appear in the order their first sample appears in the list, capped at
/// [`MAX_DAYS`]. Samples without a usable `dt` can't be placed on a day and
/// are dropped.
pub fn daily_summaries<Tz>(raw: &Value, now: &DateTime<Tz>) -> Vec<DailyForecastSummary>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tz = now.timezone();
    let today = now.date_naive();
    let mut groups: Vec<DayGroup<'_, Tz>> = Vec::new();

    for sample in samples(raw) {
        let Some(at) = sample_time(sample, &tz) else {
            tracing::debug!("forecast sample without a usable timestamp, skipping");
            continue;
        };

        if at.date_naive() == today {
            continue;
        }

        let key = day_key(&at);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.samples.push((sample, at)),
            None => groups.push(DayGroup {
                key,
                first_seen: at.clone(),
                samples: vec![(sample, at)],
            }),
        }
    }

    groups.truncate(MAX_DAYS);
    groups.iter().map(summarise).collect()
}

fn summarise<Tz>(group: &DayGroup<'_, Tz>) -> DailyForecastSummary
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (min_temp, max_temp) = temperature_range(group);

    DailyForecastSummary {
        day_key: group.key,
        weekday_label: group.first_seen.format("%a").to_string(),
        day_of_month: group.key.day,
        min_temp,
        max_temp,
        representative_icon: representative_icon(group),
        dominant_condition: dominant_condition(group),
    }
}

/// Min/max over the samples that actually carry a numeric temperature.
/// A day with none of them reports `0..0`.
fn temperature_range<Tz: TimeZone>(group: &DayGroup<'_, Tz>) -> (f64, f64) {
    let range = group
        .samples
        .iter()
        .filter_map(|(sample, _)| {
            let temp = maybe_number(sample, "main.temp");
            if temp.is_none() {
                tracing::debug!(day = %group.key, "sample without numeric temperature");
            }
            temp
        })
        .fold(None, |acc: Option<(f64, f64)>, t| match acc {
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            None => Some((t, t)),
        });

    range.unwrap_or((0.0, 0.0))
}

/// Most frequent `weather[0].main`; ties go to the label seen first.
/// Samples without a string label don't vote.
fn dominant_condition<Tz: TimeZone>(group: &DayGroup<'_, Tz>) -> String {
    let mut tally: Vec<(String, usize)> = Vec::new();

    for (sample, _) in &group.samples {
        let Some(label) = lookup(sample, "weather.0.main").and_then(Value::as_str) else {
            continue;
        };
        let label = label.to_string();
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (label, count) in tally {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((label, count));
        }
    }

    best.map(|(label, _)| label)
        .unwrap_or_else(|| DEFAULT_CONDITION.to_string())
}

/// Icon of a midday sample if there is one, so a day never shows a night icon.
fn representative_icon<Tz: TimeZone>(group: &DayGroup<'_, Tz>) -> String {
    let chosen = group
        .samples
        .iter()
        .find(|(sample, at)| DAYTIME_HOURS.contains(&at.hour()) && has_weather(sample))
        .or_else(|| group.samples.iter().find(|(sample, _)| has_weather(sample)))
        .or_else(|| group.samples.first());

    chosen
        .map(|(sample, _)| text(sample, "weather.0.icon", DEFAULT_ICON))
        .filter(|icon| !icon.is_empty())
        .unwrap_or_else(|| DEFAULT_ICON.to_string())
}

/// The first [`HOURLY_SAMPLES`] samples, unaggregated, in `tz` local time.
///
/// Every field is default-filled; no sample is dropped.
pub fn hourly_strip<Tz>(raw: &Value, tz: &Tz) -> Vec<HourlySlot>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    samples(raw)
        .iter()
        .take(HOURLY_SAMPLES)
        .map(|sample| {
            let at = sample_time(sample, tz);
            let hour = at.as_ref().map(Timelike::hour).unwrap_or(0);
            let icon = text(sample, "weather.0.icon", DEFAULT_ICON);
            let wind_speed = number(sample, "wind.speed", 0.0);

            HourlySlot {
                timestamp: at.as_ref().map(DateTime::timestamp).unwrap_or(0),
                time_label: at
                    .as_ref()
                    .map(|t| t.format("%I:%M %p").to_string())
                    .unwrap_or_else(|| "--:--".to_string()),
                hour,
                icon: if icon.is_empty() { DEFAULT_ICON.to_string() } else { icon },
                condition: text(sample, "weather.0.main", DEFAULT_CONDITION),
                temp: number(sample, "main.temp", 0.0),
                wind_deg: number(sample, "wind.deg", 0.0),
                wind_speed,
                wind_speed_kmh: mps_to_kmh(wind_speed),
                period: DayPeriod::from_hour(hour),
            }
        })
        .collect()
}
