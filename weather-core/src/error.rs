use reqwest::StatusCode;

/// Errors callers may want to tell apart. Everything else travels as
/// `anyhow::Error` with context attached.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Http {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Invalid weather data received")]
    InvalidPayload,

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `weather configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    #[error("No saved location named '{0}'. Run `weather locations list` to see saved locations.")]
    UnknownLocation(String),

    #[error("Location at {latitude}, {longitude} is already saved")]
    DuplicateLocation { latitude: f64, longitude: f64 },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
