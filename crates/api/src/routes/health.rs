//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Status of one component.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    /// `ok` or `error`.
    pub status: &'static str,
    /// Human-readable detail.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every component is up, `error` otherwise.
    pub status: &'static str,
    /// The HTTP service itself.
    pub api: ComponentHealth,
    /// Database reachability.
    pub database: ComponentHealth,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
}

/// Health check handler. Always answers 200; the body carries the verdict.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match expensa_db::ping(&state.db).await {
        Ok(()) => ComponentHealth {
            status: "ok",
            message: "Database connection is healthy".to_string(),
        },
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            ComponentHealth {
                status: "error",
                message: format!("Database connection failed: {e}"),
            }
        }
    };

    Json(HealthResponse {
        status: database.status,
        api: ComponentHealth {
            status: "ok",
            message: "API is running".to_string(),
        },
        database,
        timestamp: Utc::now(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
