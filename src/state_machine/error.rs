//! Engine error types.

use crate::models::MetricKind;
use crate::services::{FetchError, ProviderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("metric {metric} unavailable: {source}")]
    MetricUnavailable {
        metric: MetricKind,
        #[source]
        source: ProviderError,
    },

    #[error("metric {metric} has unusable value {value}")]
    InvalidMetric { metric: MetricKind, value: f64 },

    #[error("total market cap must be positive, got {total_market_cap}")]
    InvalidDenominator { total_market_cap: f64 },
}

impl EngineError {
    /// Short label used for metrics and logs
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::MetricUnavailable { .. } => "metric_unavailable",
            EngineError::InvalidMetric { .. } => "invalid_metric",
            EngineError::InvalidDenominator { .. } => "invalid_denominator",
        }
    }
}

impl From<FetchError> for EngineError {
    fn from(err: FetchError) -> Self {
        EngineError::MetricUnavailable {
            metric: err.metric,
            source: err.source,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
