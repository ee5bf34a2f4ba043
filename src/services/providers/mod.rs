//! Metric provider implementations and selection.

pub mod coinmarketcap;
pub mod http;
pub mod mock;
pub mod taapi;

pub use coinmarketcap::CoinMarketCapProvider;
pub use mock::MockProvider;
pub use taapi::TaapiProvider;

use crate::config::{Config, ConfigError};
use crate::services::market_data::MetricProvider;
use std::sync::Arc;

/// Build a provider by name. `USE_MOCK_DATA=true` forces the mock provider.
pub fn get_provider(name: &str, config: &Config) -> Result<Arc<dyn MetricProvider>, ConfigError> {
    if config.use_mock_data || name == MockProvider::NAME {
        return Ok(Arc::new(MockProvider::new()));
    }

    match name {
        CoinMarketCapProvider::NAME => Ok(Arc::new(CoinMarketCapProvider::new(
            &config.coinmarketcap,
            &config.provider,
        )?)),
        TaapiProvider::NAME => Ok(Arc::new(TaapiProvider::new(
            &config.taapi,
            &config.provider,
        )?)),
        other => Err(ConfigError::UnknownProvider(other.to_string())),
    }
}
