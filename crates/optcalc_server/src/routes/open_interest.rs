//! Max-pain endpoint

use axum::{extract::State, response::Json, routing::post, Router};
use optcalc_models::open_interest::{MaxPainConvention, MaxPainTable, OpenInterestRow, StrikePain};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Max-pain request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxPainRequest {
    /// Open interest per strike, in any order
    pub rows: Vec<OpenInterestRow>,
    /// Overrides the server's `[calculator]` convention
    #[serde(default)]
    pub convention: Option<MaxPainConvention>,
}

/// Max-pain response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxPainResponse {
    /// Selected strike
    pub strike: f64,
    /// Convention the strike was selected under
    pub convention: MaxPainConvention,
    /// Pain at each listed strike, in request order
    pub profile: Vec<StrikePain>,
}

/// Build the open-interest routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/max-pain", post(max_pain_handler))
}

/// POST /api/v1/max-pain - Max-pain strike and pain profile
async fn max_pain_handler(
    State(state): State<AppState>,
    Json(request): Json<MaxPainRequest>,
) -> Result<Json<MaxPainResponse>, ApiError> {
    let table = MaxPainTable::new(request.rows)?;
    let convention = request
        .convention
        .unwrap_or(state.calculator.config().max_pain_convention);

    let response = MaxPainResponse {
        strike: table.max_pain_strike(convention),
        convention,
        profile: state.calculator.pain_profile(&table),
    };
    tracing::debug!(strikes = table.len(), strike = response.strike, "max pain computed");

    Ok(Json(response))
}
