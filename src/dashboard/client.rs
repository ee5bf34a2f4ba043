//! Backend client used by the dashboard.

use crate::models::{MetricKind, MetricValue, StateResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DataPayload {
    ok: bool,
    #[serde(default)]
    data: BTreeMap<MetricKind, MetricValue>,
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current market state, or `None` when the backend reports it unavailable.
    pub async fn fetch_state(&self) -> Option<StateResult> {
        let body = self.get("/api/state").await?;
        decode_state(body)
    }

    /// Raw metrics keyed by kind, or `None` when unavailable.
    pub async fn fetch_data(&self) -> Option<BTreeMap<MetricKind, MetricValue>> {
        let body = self.get("/api/data").await?;
        decode_data(body)
    }

    async fn get(&self, path: &str) -> Option<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Backend unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(url = %url, status = response.status().as_u16(), "Backend returned an error");
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Backend returned malformed JSON");
                None
            }
        }
    }
}

/// Non-`ok` payloads are unavailable, never partial.
pub fn decode_state(body: Value) -> Option<StateResult> {
    if body.get("ok").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    serde_json::from_value(body).ok()
}

pub fn decode_data(body: Value) -> Option<BTreeMap<MetricKind, MetricValue>> {
    let payload: DataPayload = serde_json::from_value(body).ok()?;
    payload.ok.then_some(payload.data)
}
