//! Greeks and implied-volatility endpoints
//!
//! Volatility and rates are decimals on the wire (`0.2` for 20%).

use axum::{extract::State, response::Json, routing::post, Router};
use optcalc_models::analytical::OptionGreeks;
use optcalc_models::instruments::{ImpliedVolatilityQuery, OptionParameters};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Implied-volatility response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpliedVolatilityResponse {
    /// Annualised volatility (decimal)
    pub implied_volatility: f64,
}

/// Build the greeks routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/greeks", post(greeks_handler))
        .route("/api/v1/implied-volatility", post(implied_volatility_handler))
}

/// POST /api/v1/greeks - Black-Scholes Greeks in trading conventions
async fn greeks_handler(
    State(state): State<AppState>,
    Json(params): Json<OptionParameters>,
) -> Result<Json<OptionGreeks>, ApiError> {
    let greeks = state.calculator.greeks(&params)?;
    tracing::debug!(option_type = %params.option_type, delta = greeks.delta, "greeks computed");
    Ok(Json(greeks))
}

/// POST /api/v1/implied-volatility - Newton-Raphson implied volatility
async fn implied_volatility_handler(
    State(state): State<AppState>,
    Json(query): Json<ImpliedVolatilityQuery>,
) -> Result<Json<ImpliedVolatilityResponse>, ApiError> {
    let implied_volatility = state.calculator.implied_volatility(&query)?;
    Ok(Json(ImpliedVolatilityResponse { implied_volatility }))
}
