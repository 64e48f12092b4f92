use crate::{
    Coordinates, WeatherReading,
    config::ProvidersConfig,
    error::ProviderError,
    provider::{forecast::OpenMeteoForecast, geocoding::OpenMeteoGeocoder},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod forecast;
pub mod geocoding;

const USER_AGENT: &str = concat!("weatherbot/", env!("CARGO_PKG_VERSION"));

/// Which upstream service a call went to; used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Geocoding,
    Forecast,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Geocoding => "geocoding",
            ProviderId::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn locate(&self, city: &str) -> Result<Coordinates, ProviderError>;
}

/// Looks up current conditions at a point.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, latitude: f64, longitude: f64)
    -> Result<WeatherReading, ProviderError>;
}

/// Both Open-Meteo clients, sharing one connection pool.
pub fn open_meteo_from_config(
    config: &ProvidersConfig,
) -> anyhow::Result<(Arc<dyn Geocoder>, Arc<dyn WeatherSource>)> {
    let http = Client::builder().user_agent(USER_AGENT).build()?;

    let geocoder: Arc<dyn Geocoder> =
        Arc::new(OpenMeteoGeocoder::new(config.geocoding_url.clone(), http.clone()));
    let weather: Arc<dyn WeatherSource> =
        Arc::new(OpenMeteoForecast::new(config.forecast_url.clone(), http));

    Ok((geocoder, weather))
}

/// Reads the body whatever the status, so failures can be logged with it.
async fn read_body(
    provider: ProviderId,
    res: reqwest::Response,
) -> Result<String, ProviderError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
