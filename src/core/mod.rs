//! Application wiring: the HTTP API around the engine.

pub mod http;

pub use http::*;
