//! Turns a chat message into a sentence about the current temperature.
//!
//! The whole (trimmed) message is taken as the city name. Each upstream
//! step that yields nothing short-circuits into a fixed fallback message.

use std::sync::Arc;

use crate::{
    ChatResponse, Coordinates, WeatherReading,
    config::ProvidersConfig,
    provider::{Geocoder, WeatherSource, open_meteo_from_config},
};

pub const WEATHER_UNAVAILABLE: &str =
    "Sorry, I successfully found the city but couldn't retrieve the weather data.";

#[derive(Debug, Clone)]
pub struct ChatHandler {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl ChatHandler {
    pub fn new(geocoder: Arc<dyn Geocoder>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { geocoder, weather }
    }

    /// Handler backed by the Open-Meteo services named in `config`.
    pub fn open_meteo(config: &ProvidersConfig) -> anyhow::Result<Self> {
        let (geocoder, weather) = open_meteo_from_config(config)?;
        Ok(Self::new(geocoder, weather))
    }

    pub async fn reply(&self, message: &str) -> ChatResponse {
        let city = message.trim();
        tracing::info!(city, "Received message");

        // Clients log their own failures with provider context.
        let coords = match self.geocoder.locate(city).await {
            Ok(coords) => coords,
            Err(_) => return ChatResponse::new(not_found_message(city)),
        };

        let reading = match self.weather.current(coords.latitude, coords.longitude).await {
            Ok(reading) => reading,
            Err(_) => return ChatResponse::new(WEATHER_UNAVAILABLE),
        };

        ChatResponse::new(describe(&coords, &reading))
    }
}

pub fn not_found_message(city: &str) -> String {
    format!(
        "I couldn't find weather data for '{city}'. \
         Please try entering just the city name (e.g., 'London', 'Tokyo')."
    )
}

pub fn describe(coords: &Coordinates, reading: &WeatherReading) -> String {
    format!(
        "The current temperature in {}, {} is {}{}.",
        coords.name,
        coords.country.as_deref().unwrap_or_default(),
        format_temperature(reading.temperature),
        reading.unit,
    )
}

/// Renders like a JSON float: whole numbers keep one decimal (`15.0`).
fn format_temperature(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
