//! TAAPI.IO provider: BTC price and moving averages.

use crate::config::{ProviderSettings, TaapiSettings};
use crate::models::MetricKind;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::market_data::MetricProvider;
use crate::services::providers::http::{extract_f64, JsonClient};

pub struct TaapiProvider {
    http: JsonClient,
    settings: TaapiSettings,
}

impl TaapiProvider {
    pub const NAME: &'static str = "taapi";

    pub fn new(
        settings: &TaapiSettings,
        provider_settings: &ProviderSettings,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: JsonClient::new(Self::NAME, &settings.base_url, provider_settings)?,
            settings: settings.clone(),
        })
    }

    fn base_query(&self) -> ProviderResult<Vec<(&'static str, String)>> {
        let secret = self
            .settings
            .secret
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: Self::NAME.to_string(),
                variable: "TAAPI_SECRET",
            })?;
        Ok(vec![
            ("secret", secret.clone()),
            ("exchange", self.settings.exchange.clone()),
            ("symbol", self.settings.symbol.clone()),
            ("interval", self.settings.interval.clone()),
        ])
    }

    async fn indicator(&self, endpoint: &str, period: Option<u32>) -> ProviderResult<f64> {
        let mut query = self.base_query()?;
        if let Some(period) = period {
            query.push(("period", period.to_string()));
        }
        let body = self.http.get_json(endpoint, &query, &[]).await?;
        extract_f64(Self::NAME, &body, &["/value"])
    }
}

#[async_trait::async_trait]
impl MetricProvider for TaapiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, kind: MetricKind) -> ProviderResult<f64> {
        match kind {
            MetricKind::BtcPrice => self.indicator("/price", None).await,
            MetricKind::Ma50 => self.indicator("/ma", Some(50)).await,
            MetricKind::Ma200 => self.indicator("/ma", Some(200)).await,
            MetricKind::TotalMarketCap | MetricKind::StablecoinMarketCap => {
                Err(ProviderError::Unsupported {
                    provider: Self::NAME.to_string(),
                    metric: kind,
                })
            }
        }
    }
}
