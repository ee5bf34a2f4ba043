//! Unit tests for metric routing and snapshots

use bullbear::config::Config;
use bullbear::models::MetricKind;
use bullbear::services::providers::{get_provider, MockProvider};
use bullbear::services::{DataFetcher, MetricProvider, MetricSource, ProviderError};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::common_fixtures::FailingProvider;

#[tokio::test]
async fn uniform_fetcher_tags_values_with_provider() {
    let fetcher = DataFetcher::uniform(Arc::new(MockProvider::new()));
    let snapshot = fetcher.snapshot().await.unwrap();

    assert_eq!(snapshot.values().len(), 5);
    for kind in MetricKind::ALL {
        let value = snapshot.get(kind).unwrap();
        assert_eq!(value.provider, "mock");
        assert!(value.value > 0.0);
    }
}

#[tokio::test]
async fn snapshot_keys_follow_canonical_order() {
    let fetcher = DataFetcher::uniform(Arc::new(MockProvider::new()));
    let snapshot = fetcher.snapshot().await.unwrap();
    let keys: Vec<MetricKind> = snapshot.values().keys().copied().collect();
    assert_eq!(keys, MetricKind::ALL.to_vec());
}

#[tokio::test]
async fn snapshot_stops_at_first_failure() {
    let provider = Arc::new(FailingProvider::new(MetricKind::Ma200));
    let fetcher = DataFetcher::uniform(provider.clone());

    let err = fetcher.snapshot().await.unwrap_err();
    assert_eq!(err.metric, MetricKind::Ma200);
    assert!(matches!(err.source, ProviderError::Status { status: 503, .. }));
    // BTC_PRICE, MA50, MA200 then stop
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn negative_values_are_rejected() {
    let mut mock = MockProvider::new();
    mock.set(MetricKind::StablecoinMarketCap, -1.0);
    let fetcher = DataFetcher::uniform(Arc::new(mock));

    let err = fetcher.get(MetricKind::StablecoinMarketCap).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidValue { value, .. } if value == -1.0));
}

#[tokio::test]
async fn non_finite_values_are_rejected() {
    let mut mock = MockProvider::new();
    mock.set(MetricKind::BtcPrice, f64::NAN);
    let fetcher = DataFetcher::uniform(Arc::new(mock));

    assert!(matches!(
        fetcher.get(MetricKind::BtcPrice).await,
        Err(ProviderError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn unrouted_metric_is_unsupported() {
    let mut routes: BTreeMap<MetricKind, Arc<dyn MetricProvider>> = BTreeMap::new();
    routes.insert(MetricKind::BtcPrice, Arc::new(MockProvider::new()));
    let fetcher = DataFetcher::new(routes);

    assert!(fetcher.get(MetricKind::BtcPrice).await.is_ok());
    assert!(matches!(
        fetcher.get(MetricKind::Ma50).await,
        Err(ProviderError::Unsupported { metric: MetricKind::Ma50, .. })
    ));
}

#[test]
fn default_routing_splits_market_data_and_moving_averages() {
    let config = Config::default();
    let fetcher = DataFetcher::from_config(&config).unwrap();

    assert_eq!(fetcher.provider_for(MetricKind::BtcPrice), Some("coinmarketcap"));
    assert_eq!(fetcher.provider_for(MetricKind::TotalMarketCap), Some("coinmarketcap"));
    assert_eq!(fetcher.provider_for(MetricKind::StablecoinMarketCap), Some("coinmarketcap"));
    assert_eq!(fetcher.provider_for(MetricKind::Ma50), Some("taapi"));
    assert_eq!(fetcher.provider_for(MetricKind::Ma200), Some("taapi"));
}

#[test]
fn mock_flag_overrides_every_route() {
    let config = Config {
        use_mock_data: true,
        ..Config::default()
    };
    let fetcher = DataFetcher::from_config(&config).unwrap();
    for kind in MetricKind::ALL {
        assert_eq!(fetcher.provider_for(kind), Some("mock"));
    }
}

#[test]
fn unknown_provider_is_a_config_error() {
    let result = get_provider("binance", &Config::default());
    assert!(matches!(
        result,
        Err(bullbear::config::ConfigError::UnknownProvider(name)) if name == "binance"
    ));
}

#[test]
fn mock_provider_resolves_without_network() {
    let provider = get_provider("mock", &Config::default()).unwrap();
    assert_eq!(provider.name(), "mock");
    let value = tokio_test::block_on(provider.fetch(MetricKind::Ma200)).unwrap();
    assert_eq!(value, 85_000.0);
}

#[tokio::test]
async fn get_all_matches_snapshot() {
    let fetcher = DataFetcher::uniform(Arc::new(MockProvider::new()));
    let all = fetcher.get_all().await.unwrap();
    let snapshot = fetcher.snapshot().await.unwrap();
    assert_eq!(&all, snapshot.values());
}
