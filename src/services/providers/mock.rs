use crate::models::MetricKind;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::market_data::MetricProvider;
use std::collections::HashMap;

/// Offline provider returning fixed values, used for local runs and tests.
#[derive(Debug, Clone)]
pub struct MockProvider {
    values: HashMap<MetricKind, f64>,
}

impl MockProvider {
    pub const NAME: &'static str = "mock";

    pub fn new() -> Self {
        Self::with_values([
            (MetricKind::BtcPrice, 95_000.0),
            (MetricKind::Ma50, 92_000.0),
            (MetricKind::Ma200, 85_000.0),
            (MetricKind::TotalMarketCap, 3_200_000_000_000.0),
            (MetricKind::StablecoinMarketCap, 200_000_000_000.0),
        ])
    }

    pub fn with_values(values: impl IntoIterator<Item = (MetricKind, f64)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn set(&mut self, kind: MetricKind, value: f64) {
        self.values.insert(kind, value);
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MetricProvider for MockProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, kind: MetricKind) -> ProviderResult<f64> {
        self.values
            .get(&kind)
            .copied()
            .ok_or_else(|| ProviderError::Unsupported {
                provider: Self::NAME.to_string(),
                metric: kind,
            })
    }
}
