//! CoinMarketCap provider: BTC spot price and global market capitalisation.

use crate::config::{CoinMarketCapSettings, ProviderSettings};
use crate::models::MetricKind;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::market_data::MetricProvider;
use crate::services::providers::http::{extract_f64, JsonClient};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const GLOBAL_METRICS_PATH: &str = "/v1/global-metrics/quotes/latest";
const QUOTES_PATH: &str = "/v2/cryptocurrency/quotes/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Both market caps are read from one global-metrics response while it is
/// fresh, so a snapshot's ratio never mixes two upstream responses.
pub const GLOBAL_METRICS_TTL: Duration = Duration::from_secs(10);

pub struct CoinMarketCapProvider {
    http: JsonClient,
    api_key: Option<String>,
    global_metrics: Mutex<Option<(Instant, Arc<Value>)>>,
}

impl CoinMarketCapProvider {
    pub const NAME: &'static str = "coinmarketcap";

    pub fn new(
        settings: &CoinMarketCapSettings,
        provider_settings: &ProviderSettings,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: JsonClient::new(Self::NAME, &settings.base_url, provider_settings)?,
            api_key: settings.api_key.clone(),
            global_metrics: Mutex::new(None),
        })
    }

    fn auth_headers(&self) -> ProviderResult<[(&'static str, String); 1]> {
        let key = self
            .api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: Self::NAME.to_string(),
                variable: "COINMARKETCAP_API_KEY",
            })?;
        Ok([(API_KEY_HEADER, key.clone())])
    }

    async fn global_metric(&self, pointers: &[&str]) -> ProviderResult<f64> {
        let body = self.global_metrics_body().await?;
        extract_f64(Self::NAME, &body, pointers)
    }

    /// The lock is held across the request so concurrent readers share one call.
    /// Failures are not cached.
    async fn global_metrics_body(&self) -> ProviderResult<Arc<Value>> {
        let headers = self.auth_headers()?;
        let mut cached = self.global_metrics.lock().await;
        if let Some((fetched_at, body)) = cached.as_ref() {
            if fetched_at.elapsed() < GLOBAL_METRICS_TTL {
                return Ok(body.clone());
            }
        }

        let body = Arc::new(self.http.get_json(GLOBAL_METRICS_PATH, &[], &headers).await?);
        *cached = Some((Instant::now(), body.clone()));
        Ok(body)
    }

    async fn btc_price(&self) -> ProviderResult<f64> {
        let headers = self.auth_headers()?;
        let query = [("symbol", "BTC".to_string()), ("convert", "USD".to_string())];
        let body = self.http.get_json(QUOTES_PATH, &query, &headers).await?;
        // v2 returns an array per symbol, v1 a single object
        extract_f64(
            Self::NAME,
            &body,
            &["/data/BTC/0/quote/USD/price", "/data/BTC/quote/USD/price"],
        )
    }
}

#[async_trait::async_trait]
impl MetricProvider for CoinMarketCapProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, kind: MetricKind) -> ProviderResult<f64> {
        match kind {
            MetricKind::BtcPrice => self.btc_price().await,
            MetricKind::TotalMarketCap => {
                self.global_metric(&["/data/quote/USD/total_market_cap"])
                    .await
            }
            MetricKind::StablecoinMarketCap => {
                self.global_metric(&[
                    "/data/quote/USD/stablecoin_market_cap",
                    "/data/stablecoin_market_cap",
                ])
                .await
            }
            MetricKind::Ma50 | MetricKind::Ma200 => Err(ProviderError::Unsupported {
                provider: Self::NAME.to_string(),
                metric: kind,
            }),
        }
    }
}
