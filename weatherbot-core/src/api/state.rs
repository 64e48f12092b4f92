use std::sync::Arc;

use crate::chat::ChatHandler;
use crate::config::Config;

/// Shared application state passed to all handlers via Axum's State extractor.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub chat: ChatHandler,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// State backed by the Open-Meteo providers named in `config`.
    pub fn new(config: Config) -> anyhow::Result<SharedState> {
        let chat = ChatHandler::open_meteo(&config.providers)?;
        Ok(Self::with_handler(config, chat))
    }

    pub fn with_handler(config: Config, chat: ChatHandler) -> SharedState {
        Arc::new(AppState { config, chat })
    }
}
