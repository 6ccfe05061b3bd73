//! User directory routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use expensa_db::entities::users;
use expensa_db::{NewUser, UserRepository, UserRole};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiPath, ValidatedJson};

/// Request body for creating a user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Unique email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
    /// Role, `EMPLOYEE` when omitted.
    #[serde(default)]
    pub role: UserRole,
    /// Optional manager.
    pub manager_id: Option<Uuid>,
}

/// A user as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: String,
    /// Manager, if any.
    pub manager_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            manager_id: user.manager_id,
            created_at: user.created_at.with_timezone(&Utc),
        }
    }
}

/// Creates user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let repo = UserRepository::new(Arc::clone(&state.db));

    if repo.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "User with email {} already exists",
            payload.email
        )));
    }

    let user = repo
        .create(NewUser {
            email: payload.email,
            name: payload.name,
            role: payload.role,
            manager_id: payload.manager_id,
        })
        .await?;

    info!(user_id = %user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = UserRepository::new(Arc::clone(&state.db)).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    UserRepository::new(Arc::clone(&state.db))
        .find_by_id(id)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::not_found(format!("User with ID {id} not found")))
}
