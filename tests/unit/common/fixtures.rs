//! Shared builders for unit tests

use bullbear::models::{MetricKind, MetricValue};
use bullbear::services::{MetricProvider, MetricSnapshot, ProviderError, ProviderResult};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn snapshot(
    price: f64,
    ma50: f64,
    ma200: f64,
    total_market_cap: f64,
    stablecoin_market_cap: f64,
) -> MetricSnapshot {
    [
        (MetricKind::BtcPrice, price),
        (MetricKind::Ma50, ma50),
        (MetricKind::Ma200, ma200),
        (MetricKind::TotalMarketCap, total_market_cap),
        (MetricKind::StablecoinMarketCap, stablecoin_market_cap),
    ]
    .into_iter()
    .map(|(kind, value)| (kind, MetricValue::new(value, "fixture")))
    .collect()
}

/// Provider that fails for one metric and counts every call.
pub struct FailingProvider {
    pub failing: MetricKind,
    pub calls: AtomicUsize,
}

impl FailingProvider {
    pub fn new(failing: MetricKind) -> Self {
        Self {
            failing,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MetricProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, kind: MetricKind) -> ProviderResult<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if kind == self.failing {
            Err(ProviderError::Status {
                provider: "failing".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(100.0)
        }
    }
}
