//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST routes for users, expense reports and expenses
//! - The caller identity middleware
//! - Validating request extractors
//! - Error to response mapping

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use axum::{Router, http::HeaderValue};
use expensa_core::expense::ExpenseService;
use expensa_core::report::ReportService;
use expensa_db::{ExpenseRepository, ReportRepository};
use expensa_shared::config::CorsConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::middleware::CallerResolver;

/// Report service backed by the database.
pub type Reports = ReportService<ReportRepository>;

/// Expense service backed by the database.
pub type Expenses = ExpenseService<ExpenseRepository, ReportRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Decides who each request runs as.
    pub caller_resolver: Arc<dyn CallerResolver>,
    /// Expense report lifecycle.
    pub reports: Arc<Reports>,
    /// Expense lifecycle.
    pub expenses: Arc<Expenses>,
}

impl AppState {
    /// Wires the services to one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, caller_resolver: Arc<dyn CallerResolver>) -> Self {
        let db = Arc::new(db);
        let report_repo = Arc::new(ReportRepository::new(Arc::clone(&db)));
        let expense_repo = Arc::new(ExpenseRepository::new(Arc::clone(&db)));
        let reports = Arc::new(ReportService::new(report_repo));
        let expenses = Arc::new(ExpenseService::new(expense_repo, Arc::clone(&reports)));

        Self {
            db,
            caller_resolver,
            reports,
            expenses,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match cors.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(AllowOrigin::exact(origin)),
        Some(Err(_)) => {
            warn!(origin = ?cors.allowed_origin, "Ignoring invalid CORS origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
