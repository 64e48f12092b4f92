use anyhow::{Context, bail};
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;
use crate::config::CorsConfig;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.cors)?;

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/chat", post(handlers::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

// Credentials rule out wildcard methods/headers, so mirror the preflight instead.
fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            if origin.trim() == "*" {
                bail!(
                    "Invalid CORS origin in config: '{origin}'; \
                     wildcards cannot be combined with credentials, list each origin instead"
                );
            }
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin in config: '{origin}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
