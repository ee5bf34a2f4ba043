//! Shared data models spanning the engine, API and dashboard layers.

pub mod metric;
pub mod state;

pub use metric::{MetricKind, MetricValue};
pub use state::{
    FundingBehavior, MarketState, RiskLevel, StateMetadata, StateResult, TrendDirection,
};
