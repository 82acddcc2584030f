//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use studyport_models::UserRole;

/// Claims embedded in an access token.
///
/// The role is decoded into [`UserRole`] at the verification boundary, so a
/// token carrying an unknown role string never makes it past decoding.
///
/// # Fields
///
/// - `sub`: account ID (subject)
/// - `email`: account email address
/// - `role`: system role baked in at login
/// - `exp`: expiration timestamp (Unix seconds)
/// - `iat`: issued-at timestamp (Unix seconds)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}
