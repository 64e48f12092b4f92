use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by `POST /chat`; failures are expressed in `response` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// A resolved place, as named by the geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a pair of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    /// Unit as reported by the provider, e.g. "°C".
    pub unit: String,
    /// WMO weather interpretation code, when the provider sends one.
    pub weather_code: Option<i32>,
}
