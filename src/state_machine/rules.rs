//! Classification sub-rules.
//!
//! Each rule is a pure function of its numeric inputs. The thresholds and
//! scaling factors are fixed; changing them changes observable output.

use crate::models::{FundingBehavior, MetricKind, TrendDirection};
use crate::state_machine::error::{EngineError, EngineResult};

/// Stablecoin share (percent) separating offensive from defensive funding.
pub const FUNDING_THRESHOLD_PCT: f64 = 8.0;

/// Sensitivity of trend confidence to MA separation.
pub const TREND_CONFIDENCE_SCALE: f64 = 10.0;

/// Sensitivity of funding confidence to distance from the threshold.
pub const FUNDING_CONFIDENCE_SCALE: f64 = 5.0;

/// Every input must be finite and non-negative. MA50 is a confidence
/// denominator, so it must also be strictly positive.
pub fn validate_metric(metric: MetricKind, value: f64) -> EngineResult<f64> {
    let usable = match metric {
        MetricKind::Ma50 => value.is_finite() && value > 0.0,
        _ => value.is_finite() && value >= 0.0,
    };
    if usable {
        Ok(value)
    } else {
        Err(EngineError::InvalidMetric { metric, value })
    }
}

/// Bullish only for the strict chain `price > ma50 > ma200`.
pub fn determine_trend(price: f64, ma50: f64, ma200: f64) -> TrendDirection {
    if price > ma50 && ma50 > ma200 {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    }
}

/// Stablecoin market cap as a percentage of total market cap.
pub fn stablecoin_ratio(stablecoin_market_cap: f64, total_market_cap: f64) -> EngineResult<f64> {
    if !total_market_cap.is_finite() || total_market_cap <= 0.0 {
        return Err(EngineError::InvalidDenominator { total_market_cap });
    }
    Ok((stablecoin_market_cap / total_market_cap) * 100.0)
}

/// Below the threshold capital is flowing into risk assets. The threshold
/// itself counts as defensive.
pub fn determine_funding(stablecoin_ratio: f64) -> FundingBehavior {
    if stablecoin_ratio < FUNDING_THRESHOLD_PCT {
        FundingBehavior::Offensive
    } else {
        FundingBehavior::Defensive
    }
}

/// Heuristic confidence in `[0, 1]`: mean of trend and funding clarity.
pub fn calculate_confidence(price: f64, ma50: f64, ma200: f64, stablecoin_ratio: f64) -> f64 {
    let price_ma50_diff = (price - ma50).abs() / ma50;
    let ma50_ma200_diff = if ma200 > 0.0 {
        (ma50 - ma200).abs() / ma200
    } else {
        0.0
    };
    let trend_confidence =
        f64::min(1.0, (price_ma50_diff + ma50_ma200_diff) * TREND_CONFIDENCE_SCALE);

    let funding_diff = (stablecoin_ratio - FUNDING_THRESHOLD_PCT).abs() / FUNDING_THRESHOLD_PCT;
    let funding_confidence = f64::min(1.0, funding_diff * FUNDING_CONFIDENCE_SCALE);

    ((trend_confidence + funding_confidence) / 2.0).clamp(0.0, 1.0)
}
