//! Liveness and readiness probes
//!
//! `/health` also echoes the numerical conventions the calculators run
//! under, so a client can tell a legacy-compatible deployment from a
//! default one.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use optcalc_models::analytical::{CdfApproximation, IvSolverMode};
use optcalc_models::open_interest::MaxPainConvention;
use serde::{Deserialize, Serialize};

use super::AppState;

/// Calculator conventions in effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSummary {
    /// Normal CDF used by pricing and Greeks
    pub cdf_approximation: CdfApproximation,
    /// Implied-volatility iteration mode
    pub iv_solver: IvSolverMode,
    /// Default max-pain convention
    pub max_pain_convention: MaxPainConvention,
    /// Maintenance margin fraction for margin scenarios
    pub maintenance_margin: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status ("healthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Deployment environment
    pub environment: String,
    /// Active calculator conventions
    pub calculator: CalculatorSummary,
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    /// Ready status
    pub ready: bool,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.calculator.config();
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        environment: state.config.environment.to_string(),
        calculator: CalculatorSummary {
            cdf_approximation: settings.cdf_approximation,
            iv_solver: settings.iv_solver,
            max_pain_convention: settings.max_pain_convention,
            maintenance_margin: settings.maintenance_margin,
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready - Readiness probe endpoint
async fn ready_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(ReadyResponse { ready: true }))
}
