//! Prometheus metrics for the API server.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::models::MarketState;
use crate::state_machine::EngineError;

/// Metrics owned by a single server instance. Each instance has its own
/// registry so tests can build several side by side.
pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_flight: IntGauge,
    pub state_evaluations_total: IntCounterVec,
    pub state_evaluation_failures_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests handled"),
            &["route", "status"],
        )?;
        // Upper buckets cover provider round trips with retries
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["route"],
        )?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let state_evaluations_total = IntCounterVec::new(
            Opts::new("state_evaluations_total", "Successful market state evaluations"),
            &["state"],
        )?;
        let state_evaluation_failures_total = IntCounterVec::new(
            Opts::new(
                "state_evaluation_failures_total",
                "Failed market state evaluations",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(state_evaluations_total.clone()))?;
        registry.register(Box::new(state_evaluation_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            state_evaluations_total,
            state_evaluation_failures_total,
        })
    }

    pub fn record_request(&self, route: &str, status: u16, elapsed: Duration) {
        self.http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[route])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_state(&self, state: MarketState) {
        self.state_evaluations_total
            .with_label_values(&[state.code()])
            .inc();
    }

    pub fn record_failure(&self, err: &EngineError) {
        self.state_evaluation_failures_total
            .with_label_values(&[err.reason()])
            .inc();
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
