use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use studyport_core::AppError;
use studyport_models::{Account, UserRole};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::UpdateSubscriptionDto;
use crate::modules::users::service::UserService;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

/// Get all accounts (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of accounts", body = Vec<Account>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument]
pub async fn get_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = UserService::get_accounts(&state.db).await?;
    Ok(Json(accounts))
}

/// Assign a student's subscription tier and expiry (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}/subscription",
    request_body = UpdateSubscriptionDto,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Subscription updated", body = Account),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument]
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSubscriptionDto>,
) -> Result<Json<Account>, AppError> {
    let account = UserService::update_subscription(&state.db, id, dto).await?;
    Ok(Json(account))
}

/// Get the current identity's profile from the verified token
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile of the authenticated identity", body = ProfileResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument]
pub async fn get_profile(auth_user: AuthUser) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(ProfileResponse {
        user_id: auth_user.0.sub,
        email: auth_user.0.email,
        role: auth_user.0.role,
    }))
}
