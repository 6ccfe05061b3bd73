//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::caller_middleware};

pub mod expense_reports;
pub mod expenses;
pub mod health;
pub mod users;

/// Creates the API router with routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Routes that act on behalf of a caller
    let protected_routes = Router::new()
        .merge(expense_reports::routes())
        .merge(expenses::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            caller_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(protected_routes)
}
