//! Market data seams: async providers on the I/O side, a synchronous
//! metric source on the engine side.

use crate::models::{MetricKind, MetricValue};
use crate::services::error::ProviderResult;
use std::sync::Arc;

/// A remote or synthetic source of raw metric values.
#[async_trait::async_trait]
pub trait MetricProvider: Send + Sync {
    /// Provider name reported alongside every value it produces
    fn name(&self) -> &str;

    /// Fetch the current value of a single metric
    async fn fetch(&self, kind: MetricKind) -> ProviderResult<f64>;
}

/// Synchronous lookup consumed by the state machine engine.
pub trait MetricSource {
    fn get(&self, kind: MetricKind) -> ProviderResult<MetricValue>;
}

impl<S: MetricSource + ?Sized> MetricSource for &S {
    fn get(&self, kind: MetricKind) -> ProviderResult<MetricValue> {
        (**self).get(kind)
    }
}

impl<S: MetricSource + ?Sized> MetricSource for Arc<S> {
    fn get(&self, kind: MetricKind) -> ProviderResult<MetricValue> {
        (**self).get(kind)
    }
}
