//! Environment-driven configuration.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("unknown provider type: {0}")]
    UnknownProvider(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Deployment environment name (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub timeout: Duration,
    pub max_retries: usize,
    pub min_retry_delay: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
            min_retry_delay: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinMarketCapSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for CoinMarketCapSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://pro-api.coinmarketcap.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaapiSettings {
    pub secret: Option<String>,
    pub base_url: String,
    pub exchange: String,
    pub symbol: String,
    pub interval: String,
}

impl Default for TaapiSettings {
    fn default() -> Self {
        Self {
            secret: None,
            base_url: "https://api.taapi.io".to_string(),
            exchange: "binance".to_string(),
            symbol: "BTC/USDT".to_string(),
            interval: "1d".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub use_mock_data: bool,
    pub coinmarketcap: CoinMarketCapSettings,
    pub taapi: TaapiSettings,
    pub provider: ProviderSettings,
    pub backend_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            use_mock_data: false,
            coinmarketcap: CoinMarketCapSettings::default(),
            taapi: TaapiSettings::default(),
            provider: ProviderSettings::default(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(environment) = lookup("APP_ENV") {
            config.environment = environment;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(flag) = lookup("USE_MOCK_DATA") {
            config.use_mock_data = flag.trim().eq_ignore_ascii_case("true");
        }

        config.coinmarketcap.api_key = lookup("COINMARKETCAP_API_KEY");
        if let Some(url) = lookup("COINMARKETCAP_BASE_URL") {
            config.coinmarketcap.base_url = url;
        }

        config.taapi.secret = lookup("TAAPI_SECRET");
        if let Some(url) = lookup("TAAPI_BASE_URL") {
            config.taapi.base_url = url;
        }
        if let Some(exchange) = lookup("TAAPI_EXCHANGE") {
            config.taapi.exchange = exchange;
        }
        if let Some(symbol) = lookup("TAAPI_SYMBOL") {
            config.taapi.symbol = symbol;
        }
        if let Some(interval) = lookup("TAAPI_INTERVAL") {
            config.taapi.interval = interval;
        }

        if let Some(timeout) = lookup("PROVIDER_TIMEOUT_SECONDS") {
            config.provider.timeout =
                Duration::from_secs(parse("PROVIDER_TIMEOUT_SECONDS", &timeout)?);
        }
        if let Some(retries) = lookup("PROVIDER_MAX_RETRIES") {
            config.provider.max_retries = parse("PROVIDER_MAX_RETRIES", &retries)?;
        }

        if let Some(url) = lookup("BACKEND_URL") {
            config.backend_url = url;
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
