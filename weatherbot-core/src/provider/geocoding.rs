use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Coordinates, error::ProviderError};

use super::{Geocoder, ProviderId, read_body};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

const PROVIDER: ProviderId = ProviderId::Geocoding;

/// Open-Meteo place search, asking for the single best English match.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    async fn search(&self, city: &str) -> Result<Coordinates, ProviderError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let body = read_body(PROVIDER, res).await?;

        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).map_err(|source| ProviderError::Decode {
                provider: PROVIDER,
                source,
            })?;

        parsed
            .results
            .and_then(|results| results.into_iter().next())
            .map(Coordinates::from)
            .ok_or_else(|| ProviderError::NoResults {
                provider: PROVIDER,
                query: city.to_string(),
            })
    }
}

// Open-Meteo omits `results` entirely when nothing matches.
#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeoResult> for Coordinates {
    fn from(r: GeoResult) -> Self {
        Coordinates {
            name: r.name,
            country: r.country,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn locate(&self, city: &str) -> Result<Coordinates, ProviderError> {
        let result = self.search(city).await;

        match &result {
            Ok(coords) => tracing::debug!(
                city,
                name = %coords.name,
                latitude = coords.latitude,
                longitude = coords.longitude,
                "Resolved city"
            ),
            Err(err) if err.is_empty_answer() => {
                tracing::warn!(city, "No coordinates found for city")
            }
            Err(err) => tracing::error!(city, error = %err, "Geocoding lookup failed"),
        }

        result
    }
}
