//! Routes each metric kind to its provider and captures point-in-time snapshots.

use crate::config::{Config, ConfigError};
use crate::models::{MetricKind, MetricValue};
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::market_data::{MetricProvider, MetricSource};
use crate::services::providers::{get_provider, CoinMarketCapProvider, TaapiProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// A metric could not be resolved.
#[derive(Debug, Error)]
#[error("failed to fetch {metric}: {source}")]
pub struct FetchError {
    pub metric: MetricKind,
    #[source]
    pub source: ProviderError,
}

pub struct DataFetcher {
    routes: BTreeMap<MetricKind, Arc<dyn MetricProvider>>,
}

impl DataFetcher {
    pub fn new(routes: BTreeMap<MetricKind, Arc<dyn MetricProvider>>) -> Self {
        Self { routes }
    }

    /// Serve every metric from a single provider.
    pub fn uniform(provider: Arc<dyn MetricProvider>) -> Self {
        Self::new(
            MetricKind::ALL
                .into_iter()
                .map(|kind| (kind, provider.clone()))
                .collect(),
        )
    }

    /// Default routing: market data from CoinMarketCap, moving averages from TAAPI.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let coinmarketcap = get_provider(CoinMarketCapProvider::NAME, config)?;
        let taapi = get_provider(TaapiProvider::NAME, config)?;

        let routes = MetricKind::ALL
            .into_iter()
            .map(|kind| {
                let provider = match kind {
                    MetricKind::Ma50 | MetricKind::Ma200 => taapi.clone(),
                    MetricKind::BtcPrice
                    | MetricKind::TotalMarketCap
                    | MetricKind::StablecoinMarketCap => coinmarketcap.clone(),
                };
                (kind, provider)
            })
            .collect();

        Ok(Self::new(routes))
    }

    pub fn provider_for(&self, kind: MetricKind) -> Option<&str> {
        self.routes.get(&kind).map(|p| p.name())
    }

    /// Resolve one metric, rejecting negative or non-finite values.
    pub async fn get(&self, kind: MetricKind) -> ProviderResult<MetricValue> {
        let provider = self
            .routes
            .get(&kind)
            .ok_or_else(|| ProviderError::Unsupported {
                provider: "none".to_string(),
                metric: kind,
            })?;

        let value = provider.fetch(kind).await?;
        if !value.is_finite() || value < 0.0 {
            return Err(ProviderError::InvalidValue {
                provider: provider.name().to_string(),
                metric: kind,
                value,
            });
        }

        debug!(metric = %kind, provider = provider.name(), value, "Fetched metric");
        Ok(MetricValue::new(value, provider.name()))
    }

    /// Fetch all five metrics in canonical order. Stops at the first failure.
    pub async fn get_all(&self) -> Result<BTreeMap<MetricKind, MetricValue>, FetchError> {
        let mut values = BTreeMap::new();
        for kind in MetricKind::ALL {
            match self.get(kind).await {
                Ok(value) => {
                    values.insert(kind, value);
                }
                Err(source) => {
                    warn!(metric = %kind, error = %source, "Metric unavailable");
                    return Err(FetchError {
                        metric: kind,
                        source,
                    });
                }
            }
        }
        Ok(values)
    }

    pub async fn snapshot(&self) -> Result<MetricSnapshot, FetchError> {
        self.get_all().await.map(MetricSnapshot::new)
    }
}

/// Point-in-time metric values, readable synchronously by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSnapshot {
    values: BTreeMap<MetricKind, MetricValue>,
}

impl MetricSnapshot {
    pub fn new(values: BTreeMap<MetricKind, MetricValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &BTreeMap<MetricKind, MetricValue> {
        &self.values
    }

    pub fn into_values(self) -> BTreeMap<MetricKind, MetricValue> {
        self.values
    }
}

impl FromIterator<(MetricKind, MetricValue)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (MetricKind, MetricValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl MetricSource for MetricSnapshot {
    fn get(&self, kind: MetricKind) -> ProviderResult<MetricValue> {
        self.values
            .get(&kind)
            .cloned()
            .ok_or(ProviderError::NotCaptured(kind))
    }
}
