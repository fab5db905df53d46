//! Scenario and risk-ratio endpoints
//!
//! Percent inputs (`annualInterestRatePct`, `priceChangePct`, returns and
//! deviations) are whole percentages, e.g. `8.0` for 8%.

use axum::{extract::State, response::Json, routing::post, Router};
use optcalc_core::types::OptionType;
use optcalc_models::scenarios::{
    MarginResult, MarginScenario, ProjectionPoint, RoiMetrics, SortinoRating,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Margin scenario response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginResponse {
    /// Scenario outcome
    #[serde(flatten)]
    pub result: MarginResult,
    /// Equity curve from -50% to +50%
    pub projection: Vec<ProjectionPoint>,
}

/// ROI request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRequest {
    /// Capital committed
    pub initial_investment: f64,
    /// Premium collected
    pub premium: f64,
    /// Holding period in days
    pub duration_days: f64,
}

/// Breakeven request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakevenRequest {
    /// Call or put
    pub option_type: OptionType,
    /// Strike price
    pub strike_price: f64,
    /// Premium paid
    pub premium: f64,
}

/// Breakeven response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakevenResponse {
    /// Underlying price at which the long option breaks even at expiry
    pub breakeven: f64,
}

/// Sharpe ratio request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpeRequest {
    /// Portfolio return
    pub portfolio_return: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Standard deviation of returns
    pub standard_deviation: f64,
}

/// Sortino ratio request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortinoRequest {
    /// Portfolio return
    pub portfolio_return: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Downside deviation of returns
    pub downside_deviation: f64,
}

/// Ratio response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioResponse {
    /// Excess return per unit of deviation
    pub ratio: f64,
    /// Sortino band, omitted for Sharpe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<SortinoRating>,
}

/// Build the scenario routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/scenarios/margin", post(margin_handler))
        .route("/api/v1/scenarios/roi", post(roi_handler))
        .route("/api/v1/scenarios/breakeven", post(breakeven_handler))
        .route("/api/v1/ratios/sharpe", post(sharpe_handler))
        .route("/api/v1/ratios/sortino", post(sortino_handler))
}

/// POST /api/v1/scenarios/margin - Leveraged versus cash-only outcome
async fn margin_handler(
    State(state): State<AppState>,
    Json(scenario): Json<MarginScenario>,
) -> Result<Json<MarginResponse>, ApiError> {
    let result = state.calculator.margin_scenario(&scenario)?;
    let projection = state.calculator.equity_projection(&scenario)?;
    Ok(Json(MarginResponse { result, projection }))
}

/// POST /api/v1/scenarios/roi - Premium return metrics
async fn roi_handler(
    State(state): State<AppState>,
    Json(request): Json<RoiRequest>,
) -> Result<Json<RoiMetrics>, ApiError> {
    let metrics = state.calculator.roi_metrics(
        request.initial_investment,
        request.premium,
        request.duration_days,
    )?;
    Ok(Json(metrics))
}

/// POST /api/v1/scenarios/breakeven - Breakeven at expiry
async fn breakeven_handler(
    State(state): State<AppState>,
    Json(request): Json<BreakevenRequest>,
) -> Result<Json<BreakevenResponse>, ApiError> {
    let breakeven =
        state
            .calculator
            .breakeven(request.option_type, request.strike_price, request.premium)?;
    Ok(Json(BreakevenResponse { breakeven }))
}

/// POST /api/v1/ratios/sharpe
async fn sharpe_handler(
    State(state): State<AppState>,
    Json(request): Json<SharpeRequest>,
) -> Result<Json<RatioResponse>, ApiError> {
    let ratio = state.calculator.sharpe_ratio(
        request.portfolio_return,
        request.risk_free_rate,
        request.standard_deviation,
    )?;
    Ok(Json(RatioResponse {
        ratio,
        rating: None,
    }))
}

/// POST /api/v1/ratios/sortino
async fn sortino_handler(
    State(state): State<AppState>,
    Json(request): Json<SortinoRequest>,
) -> Result<Json<RatioResponse>, ApiError> {
    let ratio = state.calculator.sortino_ratio(
        request.portfolio_return,
        request.risk_free_rate,
        request.downside_deviation,
    )?;
    Ok(Json(RatioResponse {
        ratio,
        rating: Some(SortinoRating::from_ratio(ratio)),
    }))
}
