use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five market metrics the classifier consumes.
///
/// Ordering follows the canonical evaluation order, so maps keyed by
/// `MetricKind` iterate price first and market caps last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    BtcPrice,
    #[serde(rename = "MA50")]
    Ma50,
    #[serde(rename = "MA200")]
    Ma200,
    TotalMarketCap,
    StablecoinMarketCap,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::BtcPrice,
        MetricKind::Ma50,
        MetricKind::Ma200,
        MetricKind::TotalMarketCap,
        MetricKind::StablecoinMarketCap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::BtcPrice => "BTC_PRICE",
            MetricKind::Ma50 => "MA50",
            MetricKind::Ma200 => "MA200",
            MetricKind::TotalMarketCap => "TOTAL_MARKET_CAP",
            MetricKind::StablecoinMarketCap => "STABLECOIN_MARKET_CAP",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown metric kind: {}", s))
    }
}

/// A resolved metric value tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub value: f64,
    pub provider: String,
}

impl MetricValue {
    pub fn new(value: f64, provider: impl Into<String>) -> Self {
        Self {
            value,
            provider: provider.into(),
        }
    }
}
