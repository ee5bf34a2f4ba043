//! Wiremock fixtures for the CoinMarketCap and TAAPI APIs

use bullbear::config::{CoinMarketCapSettings, ProviderSettings, TaapiSettings};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CMC_KEY: &str = "test-cmc-key";
pub const TAAPI_SECRET: &str = "test-taapi-secret";

pub fn fast_retries(max_retries: usize) -> ProviderSettings {
    ProviderSettings {
        timeout: Duration::from_secs(2),
        max_retries,
        min_retry_delay: Duration::from_millis(1),
    }
}

pub fn cmc_settings(server: &MockServer) -> CoinMarketCapSettings {
    CoinMarketCapSettings {
        api_key: Some(CMC_KEY.to_string()),
        base_url: server.uri(),
    }
}

pub fn taapi_settings(server: &MockServer) -> TaapiSettings {
    TaapiSettings {
        secret: Some(TAAPI_SECRET.to_string()),
        base_url: server.uri(),
        ..TaapiSettings::default()
    }
}

pub async fn mock_global_metrics(server: &MockServer, total: f64, stablecoin: f64) {
    let response = serde_json::json!({
        "status": { "error_code": 0 },
        "data": {
            "active_cryptocurrencies": 9000,
            "quote": {
                "USD": {
                    "total_market_cap": total,
                    "stablecoin_market_cap": stablecoin
                }
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/v1/global-metrics/quotes/latest"))
        .and(header("X-CMC_PRO_API_KEY", CMC_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

pub async fn mock_btc_quote(server: &MockServer, price: f64) {
    let response = serde_json::json!({
        "data": {
            "BTC": [{
                "symbol": "BTC",
                "quote": { "USD": { "price": price } }
            }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/v2/cryptocurrency/quotes/latest"))
        .and(query_param("symbol", "BTC"))
        .and(header("X-CMC_PRO_API_KEY", CMC_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

pub async fn mock_moving_average(server: &MockServer, period: u32, value: f64) {
    Mock::given(method("GET"))
        .and(path("/ma"))
        .and(query_param("secret", TAAPI_SECRET))
        .and(query_param("symbol", "BTC/USDT"))
        .and(query_param("interval", "1d"))
        .and(query_param("period", period.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": value })),
        )
        .mount(server)
        .await;
}
