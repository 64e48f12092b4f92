use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{WeatherReading, error::ProviderError};

use super::{ProviderId, WeatherSource, read_body};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const PROVIDER: ProviderId = ProviderId::Forecast;
const CURRENT_FIELDS: &str = "temperature_2m,weather_code";

/// Open-Meteo forecast API, asking only for current conditions.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, ProviderError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let body = read_body(PROVIDER, res).await?;

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|source| ProviderError::Decode {
                provider: PROVIDER,
                source,
            })?;

        let current = parsed.current.ok_or_else(|| missing("current"))?;
        let temperature = current.temperature_2m.ok_or_else(|| missing("current.temperature_2m"))?;
        let unit = parsed
            .current_units
            .and_then(|units| units.temperature_2m)
            .ok_or_else(|| missing("current_units.temperature_2m"))?;

        Ok(WeatherReading {
            temperature,
            unit,
            weather_code: current.weather_code.as_ref().and_then(wmo_code),
        })
    }
}

// Only the temperature is required; an odd-looking code is dropped, not fatal.
fn wmo_code(value: &serde_json::Value) -> Option<i32> {
    if let Some(code) = value.as_i64() {
        return i32::try_from(code).ok();
    }
    value
        .as_f64()
        .filter(|code| code.fract() == 0.0)
        .and_then(|code| i32::try_from(code as i64).ok())
}

fn missing(field: &'static str) -> ProviderError {
    ProviderError::MissingField {
        provider: PROVIDER,
        field,
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<FmCurrent>,
    current_units: Option<FmCurrentUnits>,
}

// Open-Meteo sends `null` for variables it has no data for.
#[derive(Debug, Deserialize)]
struct FmCurrent {
    temperature_2m: Option<f64>,
    weather_code: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FmCurrentUnits {
    temperature_2m: Option<String>,
}

#[async_trait]
impl WeatherSource for OpenMeteoForecast {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, ProviderError> {
        let result = self.fetch_current(latitude, longitude).await;

        match &result {
            Ok(reading) => tracing::debug!(
                latitude,
                longitude,
                temperature = reading.temperature,
                unit = %reading.unit,
                weather_code = ?reading.weather_code,
                "Fetched current weather"
            ),
            Err(err) => {
                tracing::error!(latitude, longitude, error = %err, "Weather lookup failed")
            }
        }

        result
    }
}
