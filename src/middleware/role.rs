//! Role-based authorization for Axum routes.
//!
//! Two interchangeable forms, both built on the [`AuthUser`] extractor:
//! layer-based middleware (`require_*` with `from_fn_with_state`) and
//! extractor-based gating (`Require*` handler arguments). A route declares
//! exactly one expected role and the gate allows only an exact match. There
//! is no hierarchy: an admin token does not satisfy a teacher route.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use studyport_core::AppError;
use studyport_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Check the authenticated identity against an expected role.
///
/// Pure and stateless: the same claims and expected role always produce the
/// same decision.
pub fn check_role(auth_user: &AuthUser, expected_role: UserRole) -> Result<(), AppError> {
    if auth_user.role() != expected_role {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}, but user has role: {}",
            expected_role,
            auth_user.role()
        )));
    }

    Ok(())
}

async fn gate(
    state: AppState,
    req: Request,
    next: Next,
    expected_role: UserRole,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_role(&auth_user, expected_role)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Defines both gate forms for one role: a middleware fn usable with
/// `axum::middleware::from_fn_with_state`, and an extractor struct that
/// carries the authenticated user into the handler.
macro_rules! role_gate {
    ($middleware:ident, $extractor:ident, $role:expr, $doc_role:literal) => {
        #[doc = concat!("Middleware form of the ", $doc_role, " gate.")]
        pub async fn $middleware(
            State(state): State<AppState>,
            req: Request,
            next: Next,
        ) -> Response {
            match gate(state, req, next, $role).await {
                Ok(response) => response,
                Err(err) => err.into_response(),
            }
        }

        #[doc = concat!(
            "Extractor form of the ",
            $doc_role,
            " gate. Carries the authenticated user."
        )]
        #[derive(Debug, Clone)]
        pub struct $extractor(pub AuthUser);

        impl FromRequestParts<AppState> for $extractor {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                check_role(&auth_user, $role)?;
                Ok($extractor(auth_user))
            }
        }
    };
}

role_gate!(require_student, RequireStudent, UserRole::Student, "student");
role_gate!(require_teacher, RequireTeacher, UserRole::Teacher, "teacher");
role_gate!(require_admin, RequireAdmin, UserRole::Admin, "admin");
