use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Reasons an upstream lookup produced no usable data.
///
/// None of these reach the chat caller as an HTTP error; the chat handler
/// turns them into a fallback message.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request could not be sent: {source}")]
    Transport {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: ProviderId,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {provider} JSON: {source}")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} returned no results for '{query}'")]
    NoResults { provider: ProviderId, query: String },

    #[error("{provider} response is missing '{field}'")]
    MissingField {
        provider: ProviderId,
        field: &'static str,
    },
}

impl ProviderError {
    pub fn provider(&self) -> ProviderId {
        match self {
            ProviderError::Transport { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. }
            | ProviderError::NoResults { provider, .. }
            | ProviderError::MissingField { provider, .. } => *provider,
        }
    }

    /// True when the provider answered fine but simply had nothing to offer.
    pub fn is_empty_answer(&self) -> bool {
        matches!(
            self,
            ProviderError::NoResults { .. } | ProviderError::MissingField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_provider() {
        let err = ProviderError::NoResults {
            provider: ProviderId::Geocoding,
            query: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "geocoding returned no results for 'Atlantis'");
        assert_eq!(err.provider(), ProviderId::Geocoding);
        assert!(err.is_empty_answer());
    }

    #[test]
    fn status_error_is_not_an_empty_answer() {
        let err = ProviderError::Status {
            provider: ProviderId::Forecast,
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };
        assert!(err.to_string().contains("502 Bad Gateway"));
        assert!(err.to_string().starts_with("forecast request failed"));
        assert!(!err.is_empty_answer());
    }
}
