use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use studyport_auth::{Claims, bearer_token, verify_token};
use studyport_core::AppError;
use studyport_models::UserRole;

use crate::state::AppState;

/// Extractor that validates the bearer credential and provides the
/// authenticated identity's claims.
///
/// A request without any credential is rejected with 401 before the handler
/// runs; so is a request whose token fails verification. The claims are
/// handed to the handler as this extractor's output, never written onto the
/// request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the account ID as a UUID.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid subject in token".to_string()))
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization credential".to_string()))?;

        let token = bearer_token(auth_header);
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Missing authorization credential".to_string(),
            ));
        }

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
