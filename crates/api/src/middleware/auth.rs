//! Caller identity for protected routes.
//!
//! There is no authentication yet. A [`CallerResolver`] decides who the caller
//! is; the shipped [`FixedCallerResolver`] answers with one configured user
//! for every request. Swapping in a token-based resolver needs no handler
//! changes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use expensa_shared::types::UserId;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;

/// Decides which user a request runs as.
pub trait CallerResolver: Send + Sync {
    /// Returns the caller's user id, or `None` when the request is anonymous.
    fn resolve_caller(&self, parts: &Parts) -> Option<Uuid>;
}

/// Resolves every request to the same user.
#[derive(Debug, Clone, Copy)]
pub struct FixedCallerResolver {
    user_id: Uuid,
}

impl FixedCallerResolver {
    /// Creates a resolver that always answers `user_id`.
    #[must_use]
    pub const fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl CallerResolver for FixedCallerResolver {
    fn resolve_caller(&self, _parts: &Parts) -> Option<Uuid> {
        Some(self.user_id)
    }
}

/// The resolved caller, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Caller's user id.
    pub user_id: UserId,
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "statusCode": 401,
            "error": "UNAUTHORIZED",
            "message": "Authentication required"
        })),
    )
}

/// Resolves the caller and stores a [`CallerIdentity`] for handlers.
pub async fn caller_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let Some(user_id) = state.caller_resolver.resolve_caller(&parts) else {
        return unauthorized().into_response();
    };

    parts.extensions.insert(CallerIdentity {
        user_id: UserId::from_uuid(user_id),
    });
    next.run(Request::from_parts(parts, body)).await
}

/// Extractor for the resolved caller.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub CallerIdentity);

impl AuthUser {
    /// Returns the caller's user id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .copied()
            .map(AuthUser)
            .ok_or_else(unauthorized)
    }
}
