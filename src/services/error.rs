//! Provider error types.

use crate::models::MetricKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} response is missing field {field}")]
    MissingField { provider: String, field: String },

    #[error("{provider} returned an invalid value for {metric}: {value}")]
    InvalidValue {
        provider: String,
        metric: MetricKind,
        value: f64,
    },

    #[error("{provider} does not support metric {metric}")]
    Unsupported { provider: String, metric: MetricKind },

    #[error("{provider} requires {variable} to be set")]
    MissingApiKey {
        provider: String,
        variable: &'static str,
    },

    #[error("metric {0} is not present in the snapshot")]
    NotCaptured(MetricKind),
}

impl ProviderError {
    /// Transport failures, throttling and upstream 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
