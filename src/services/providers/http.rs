//! JSON-over-HTTP client shared by the remote providers.

use crate::config::ProviderSettings;
use crate::services::error::{ProviderError, ProviderResult};
use backon::{ExponentialBuilder, Retryable};
use serde_json::Value;
use tracing::{debug, warn};

pub struct JsonClient {
    provider: &'static str,
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
    min_retry_delay: std::time::Duration,
}

impl JsonClient {
    pub fn new(
        provider: &'static str,
        base_url: &str,
        settings: &ProviderSettings,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            provider,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            min_retry_delay: settings.min_retry_delay,
        })
    }

    /// GET `path` with query parameters and headers, retrying transient failures.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        headers: &[(&'static str, String)],
    ) -> ProviderResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| self.send_once(&url, query, headers))
            .retry(backoff)
            .when(ProviderError::is_retryable)
            .notify(|err, delay| {
                warn!(
                    provider = self.provider,
                    url = %url,
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "Provider request failed, retrying"
                );
            })
            .await
    }

    async fn send_once(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&'static str, String)],
    ) -> ProviderResult<Value> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(provider = self.provider, url = %url, status = status.as_u16(), "Provider response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.provider.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Read the first numeric value found at any of the given JSON pointers.
pub fn extract_f64(provider: &str, body: &Value, pointers: &[&str]) -> ProviderResult<f64> {
    pointers
        .iter()
        .find_map(|pointer| body.pointer(pointer).and_then(Value::as_f64))
        .ok_or_else(|| ProviderError::MissingField {
            provider: provider.to_string(),
            field: pointers.join(" | "),
        })
}
