//! HTTP mapping of calculator failures
//!
//! Every domain error is reported as `422 Unprocessable Entity` with a body
//! `{"error": <code>, "message": <text>}`, where `<code>` is one of
//! `invalid_input`, `non_convergence` or `numeric_degeneracy`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use optcalc_core::types::PricingError;
use optcalc_models::analytical::AnalyticalError;
use optcalc_models::open_interest::OpenInterestError;
use optcalc_models::scenarios::ScenarioError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable category
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// A calculator failure surfaced through the API
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] PricingError);

impl ApiError {
    /// The wrapped taxonomy error
    pub fn kind(&self) -> &PricingError {
        &self.0
    }
}

impl From<AnalyticalError> for ApiError {
    fn from(err: AnalyticalError) -> Self {
        Self(err.into())
    }
}

impl From<ScenarioError> for ApiError {
    fn from(err: ScenarioError) -> Self {
        Self(err.into())
    }
}

impl From<OpenInterestError> for ApiError {
    fn from(err: OpenInterestError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let message = self.0.to_string();
        tracing::warn!(error = code, %message, "calculation rejected");

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}
