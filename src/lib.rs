//! BullBear: four-quadrant crypto market regime classifier.
//!
//! Combines a trend signal (BTC price against its 50/200-day moving averages)
//! with a capital-flow signal (stablecoin share of total market cap) and maps
//! the pair onto one of four market states.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state_machine;

pub use state_machine::{EngineError, StateMachineEngine};
