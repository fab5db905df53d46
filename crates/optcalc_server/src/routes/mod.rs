//! Route modules for the calculator server
//!
//! This module contains endpoint group-specific routers:
//! - health: Health check and readiness endpoints
//! - greeks: Greeks and implied-volatility endpoints
//! - open_interest: Max-pain endpoint
//! - scenarios: Margin, ROI, breakeven, Sharpe and Sortino endpoints

pub mod greeks;
pub mod health;
pub mod open_interest;
pub mod scenarios;

use axum::Router;
use optcalc_models::Calculator;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Calculators bound to the `[calculator]` settings
    pub calculator: Arc<Calculator>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    ///
    /// Invalid calculator settings fall back to the defaults with a warning;
    /// `build_config` rejects them before this point.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let calculator = Calculator::new(config.calculator.clone()).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid calculator settings, using defaults");
            Calculator::default()
        });

        Self {
            config,
            calculator: Arc::new(calculator),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let state = AppState::new(config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::routes())
        .merge(greeks::routes())
        .merge(open_interest::routes())
        .merge(scenarios::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    pub fn state() -> AppState {
        AppState::new(Arc::new(ServerConfig::default()))
    }

    pub fn state_with(config: ServerConfig) -> AppState {
        AppState::new(Arc::new(config))
    }

    /// POST `body` as JSON and decode the JSON reply.
    pub async fn post_json(
        router: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }
}
