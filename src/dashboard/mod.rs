//! Terminal dashboard for the market state API.

pub mod client;
pub mod render;

pub use client::{decode_data, decode_state, BackendClient};
pub use render::{format_usd, render, risk_marker, DashboardView};
