//! HTTP endpoint server using Axum

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::metrics::Metrics;
use crate::models::{MetricKind, MetricValue, StateResult};
use crate::services::DataFetcher;
use crate::state_machine::{EngineError, StateMachineEngine};

pub const SERVICE_NAME: &str = "bullbear-backend";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Instant,
    pub fetcher: Arc<DataFetcher>,
}

impl AppState {
    pub fn new(fetcher: Arc<DataFetcher>, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            fetcher,
        }
    }
}

/// Liveness only. Provider outages surface on `/api/state`, not here.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub result: StateResult,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub ok: bool,
    pub data: BTreeMap<MetricKind, MetricValue>,
}

/// Failure body shared by the API endpoints: `{ok: false, error}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let status = match err {
            EngineError::MetricUnavailable { .. } => StatusCode::BAD_GATEWAY,
            EngineError::InvalidMetric { .. } | EngineError::InvalidDenominator { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "ok": false, "error": self.message })),
        )
            .into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Capture a fresh snapshot and classify it.
async fn get_state(State(state): State<AppState>) -> Result<Json<StateResponse>, ApiError> {
    let evaluation = match state.fetcher.snapshot().await {
        Ok(snapshot) => StateMachineEngine::new(&snapshot).evaluate(),
        Err(e) => Err(EngineError::from(e)),
    };

    match evaluation {
        Ok(result) => {
            state.metrics.record_state(result.state);
            Ok(Json(StateResponse { ok: true, result }))
        }
        Err(e) => {
            state.metrics.record_failure(&e);
            warn!(error = %e, reason = e.reason(), "Market state unavailable");
            Err(e.into())
        }
    }
}

/// Raw metric values with their providers.
async fn get_data(State(state): State<AppState>) -> Result<Json<DataResponse>, ApiError> {
    let data = state.fetcher.get_all().await.map_err(|e| {
        warn!(error = %e, "Metric data unavailable");
        ApiError::from(EngineError::from(e))
    })?;

    Ok(Json(DataResponse { ok: true, data }))
}

/// Per-route request counters and latency. Unmatched paths share one label
/// so arbitrary URLs cannot grow the label set.
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let elapsed = start.elapsed();
    state.metrics.record_request(&route, status.as_u16(), elapsed);

    if status.is_server_error() {
        error!(
            route = %route,
            status = %status,
            duration_ms = elapsed.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/state", get(get_state))
        .route("/api/data", get(get_data))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    fetcher: Arc<DataFetcher>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::new(fetcher, metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Market state available at http://0.0.0.0:{}/api/state", port);
    axum::serve(listener, app).await?;

    Ok(())
}
