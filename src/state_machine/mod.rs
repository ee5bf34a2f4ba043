//! Market regime state machine.

pub mod engine;
pub mod error;
pub mod rules;

pub use engine::{classify, MarketInputs, StateMachineEngine};
pub use error::{EngineError, EngineResult};
pub use rules::*;
