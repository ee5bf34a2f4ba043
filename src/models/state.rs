//! Market regime enumerations and the evaluation result.
//!
//! Every enumeration carries a symbolic `code()` and a display `label()`.
//! The wire format uses the label; the code is accepted on input as an alias.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    #[serde(rename = "趋势多", alias = "BULLISH")]
    Bullish,
    #[serde(rename = "趋势空", alias = "BEARISH")]
    Bearish,
}

impl TrendDirection {
    pub fn code(&self) -> &'static str {
        match self {
            TrendDirection::Bullish => "BULLISH",
            TrendDirection::Bearish => "BEARISH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Bullish => "趋势多",
            TrendDirection::Bearish => "趋势空",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingBehavior {
    #[serde(rename = "资金进攻", alias = "OFFENSIVE")]
    Offensive,
    #[serde(rename = "资金防守", alias = "DEFENSIVE")]
    Defensive,
}

impl FundingBehavior {
    pub fn code(&self) -> &'static str {
        match self {
            FundingBehavior::Offensive => "OFFENSIVE",
            FundingBehavior::Defensive => "DEFENSIVE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FundingBehavior::Offensive => "资金进攻",
            FundingBehavior::Defensive => "资金防守",
        }
    }
}

/// Four-quadrant market state: trend direction crossed with funding behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketState {
    #[serde(rename = "牛市进攻", alias = "BULL_OFFENSIVE")]
    BullOffensive,
    #[serde(rename = "牛市修复", alias = "BULL_DEFENSIVE")]
    BullDefensive,
    #[serde(rename = "熊市反弹", alias = "BEAR_OFFENSIVE")]
    BearOffensive,
    #[serde(rename = "熊市消化", alias = "BEAR_DEFENSIVE")]
    BearDefensive,
}

impl MarketState {
    pub const ALL: [MarketState; 4] = [
        MarketState::BullOffensive,
        MarketState::BullDefensive,
        MarketState::BearOffensive,
        MarketState::BearDefensive,
    ];

    /// The only way a state is derived: one fixed pairing per quadrant.
    pub fn from_parts(trend: TrendDirection, funding: FundingBehavior) -> Self {
        match (trend, funding) {
            (TrendDirection::Bullish, FundingBehavior::Offensive) => MarketState::BullOffensive,
            (TrendDirection::Bullish, FundingBehavior::Defensive) => MarketState::BullDefensive,
            (TrendDirection::Bearish, FundingBehavior::Offensive) => MarketState::BearOffensive,
            (TrendDirection::Bearish, FundingBehavior::Defensive) => MarketState::BearDefensive,
        }
    }

    pub fn trend(&self) -> TrendDirection {
        match self {
            MarketState::BullOffensive | MarketState::BullDefensive => TrendDirection::Bullish,
            MarketState::BearOffensive | MarketState::BearDefensive => TrendDirection::Bearish,
        }
    }

    pub fn funding(&self) -> FundingBehavior {
        match self {
            MarketState::BullOffensive | MarketState::BearOffensive => FundingBehavior::Offensive,
            MarketState::BullDefensive | MarketState::BearDefensive => FundingBehavior::Defensive,
        }
    }

    /// Static risk table. Depends on nothing but the state.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            MarketState::BullOffensive => RiskLevel::High,
            MarketState::BullDefensive => RiskLevel::Medium,
            MarketState::BearOffensive => RiskLevel::Medium,
            MarketState::BearDefensive => RiskLevel::Low,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MarketState::BullOffensive => "BULL_OFFENSIVE",
            MarketState::BullDefensive => "BULL_DEFENSIVE",
            MarketState::BearOffensive => "BEAR_OFFENSIVE",
            MarketState::BearDefensive => "BEAR_DEFENSIVE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketState::BullOffensive => "牛市进攻",
            MarketState::BullDefensive => "牛市修复",
            MarketState::BearOffensive => "熊市反弹",
            MarketState::BearDefensive => "熊市消化",
        }
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn code(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw inputs and the derived ratio, echoed back with every result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMetadata {
    pub btc_price: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub total_market_cap: f64,
    pub stablecoin_market_cap: f64,
    pub stablecoin_ratio: f64,
}

/// Outcome of a single engine evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResult {
    pub state: MarketState,
    pub trend: TrendDirection,
    pub funding: FundingBehavior,
    pub risk_level: RiskLevel,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub metadata: StateMetadata,
}
