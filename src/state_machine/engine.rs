//! Four-quadrant market state evaluation.

use crate::models::{MarketState, MetricKind, StateMetadata, StateResult};
use crate::services::MetricSource;
use crate::state_machine::error::{EngineError, EngineResult};
use crate::state_machine::rules::{
    calculate_confidence, determine_funding, determine_trend, stablecoin_ratio, validate_metric,
};
use tracing::debug;

/// The five raw inputs to a classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    pub btc_price: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub total_market_cap: f64,
    pub stablecoin_market_cap: f64,
}

/// Stateless classifier over an injected metric source.
///
/// Every `evaluate` call reads fresh inputs and computes a new result; nothing
/// carries over between calls.
pub struct StateMachineEngine<S> {
    source: S,
}

impl<S: MetricSource> StateMachineEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn evaluate(&self) -> EngineResult<StateResult> {
        let inputs = MarketInputs {
            btc_price: self.read(MetricKind::BtcPrice)?,
            ma50: self.read(MetricKind::Ma50)?,
            ma200: self.read(MetricKind::Ma200)?,
            total_market_cap: self.read(MetricKind::TotalMarketCap)?,
            stablecoin_market_cap: self.read(MetricKind::StablecoinMarketCap)?,
        };
        classify(&inputs)
    }

    fn read(&self, metric: MetricKind) -> EngineResult<f64> {
        self.source
            .get(metric)
            .map(|m| m.value)
            .map_err(|source| EngineError::MetricUnavailable { metric, source })
    }
}

impl MarketInputs {
    /// Reject non-finite or out-of-range inputs, checked in canonical order.
    pub fn validate(&self) -> EngineResult<()> {
        validate_metric(MetricKind::BtcPrice, self.btc_price)?;
        validate_metric(MetricKind::Ma50, self.ma50)?;
        validate_metric(MetricKind::Ma200, self.ma200)?;
        validate_metric(MetricKind::TotalMarketCap, self.total_market_cap)?;
        validate_metric(MetricKind::StablecoinMarketCap, self.stablecoin_market_cap)?;
        Ok(())
    }
}

/// Map raw inputs to a market state, risk level and confidence.
pub fn classify(inputs: &MarketInputs) -> EngineResult<StateResult> {
    inputs.validate()?;

    let trend = determine_trend(inputs.btc_price, inputs.ma50, inputs.ma200);

    let ratio = stablecoin_ratio(inputs.stablecoin_market_cap, inputs.total_market_cap)?;
    let funding = determine_funding(ratio);

    let state = MarketState::from_parts(trend, funding);
    let risk_level = state.risk_level();
    let confidence = calculate_confidence(inputs.btc_price, inputs.ma50, inputs.ma200, ratio);

    debug!(
        state = state.code(),
        trend = trend.code(),
        funding = funding.code(),
        risk = risk_level.code(),
        confidence,
        stablecoin_ratio = ratio,
        "Market state evaluated"
    );

    Ok(StateResult {
        state,
        trend,
        funding,
        risk_level,
        confidence,
        metadata: StateMetadata {
            btc_price: inputs.btc_price,
            ma50: inputs.ma50,
            ma200: inputs.ma200,
            total_market_cap: inputs.total_market_cap,
            stablecoin_market_cap: inputs.stablecoin_market_cap,
            stablecoin_ratio: ratio,
        },
    })
}
