//! Core library for the `weatherbot` chat server.
//!
//! This crate defines:
//! - Configuration handling
//! - Open-Meteo geocoding and forecast clients
//! - The chat handler turning a city name into a temperature sentence
//! - The Axum router serving it over HTTP
//!
//! It is used by `weatherbot-cli`, but can also be embedded in other services.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use chat::ChatHandler;
pub use config::{Config, CorsConfig, ProvidersConfig, ServerConfig};
pub use error::ProviderError;
pub use model::{ChatRequest, ChatResponse, Coordinates, StatusMessage, WeatherReading};
pub use provider::{Geocoder, ProviderId, WeatherSource};
