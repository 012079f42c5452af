use crate::{Config, error::WeatherError, model::Coordinates, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw, untrusted response bodies for a location.
///
/// Implementations only do transport: the bodies come back exactly as the
/// upstream sent them and are validated by the pipeline later.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current-conditions body for `coords`.
    async fn current(&self, coords: &Coordinates) -> anyhow::Result<Value>;

    /// 5-day/3-hour forecast body for `coords`.
    async fn forecast(&self, coords: &Coordinates) -> anyhow::Result<Value>;
}

/// The raw bodies of one lookup.
#[derive(Debug, Clone)]
pub struct Report {
    pub current: Value,
    pub forecast: Option<Value>,
}

/// Fetch current conditions, then the forecast.
///
/// The forecast is only requested once current conditions have arrived, and
/// failing to get it leaves `forecast` empty instead of failing the lookup.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    coords: &Coordinates,
) -> anyhow::Result<Report> {
    tracing::debug!(%coords, "fetching current weather");
    let current = provider.current(coords).await?;

    let forecast = match provider.forecast(coords).await {
        Ok(body) => Some(body),
        Err(err) => {
            tracing::warn!(%coords, error = %err, "forecast unavailable, showing current conditions only");
            None
        }
    };

    Ok(Report { current, forecast })
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;

    Ok(Box::new(OpenWeatherProvider::new(api_key)?))
}
