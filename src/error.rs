// src/error.rs
use thiserror::Error;

/// Anything that goes wrong between sending a message and holding a decoded
/// reply. Transport errors, non-2xx statuses and malformed bodies are not
/// told apart.
#[derive(Debug, Error)]
#[error("chat request failed: {0}")]
pub struct RequestFailure(#[source] BoxError);

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl RequestFailure {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid chat endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("endpoint must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("invalid viewport height {0:?}")]
    InvalidViewport(String),

    #[error("invalid log filter {value:?}: {source}")]
    InvalidLogFilter {
        value: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}
