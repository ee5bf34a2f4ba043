//! Market data acquisition: providers, routing and snapshots.

pub mod error;
pub mod fetcher;
pub mod market_data;
pub mod providers;

pub use error::{ProviderError, ProviderResult};
pub use fetcher::{DataFetcher, FetchError, MetricSnapshot};
pub use market_data::{MetricProvider, MetricSource};
