//! JWT creation and verification.
//!
//! The signing secret lives in [`JwtConfig`] and is injected by the caller;
//! nothing here reads the environment. Verification collapses every failure
//! (bad signature, malformed token, expired) into a single 401 rejection;
//! the specific cause is logged server-side only.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use studyport_config::JwtConfig;
use studyport_core::AppError;
use studyport_models::UserRole;

use crate::claims::Claims;

/// Strip the `Bearer ` scheme prefix from a raw `Authorization` header
/// value. A value without the prefix is returned as-is.
pub fn bearer_token(header_value: &str) -> &str {
    header_value.strip_prefix("Bearer ").unwrap_or(header_value)
}

/// Create an access token embedding the subject id and role.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verify an access token and return the embedded claims.
///
/// Validates signature and expiry. All failures collapse to the same
/// unauthorized error so callers cannot distinguish a forged token from an
/// expired one.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "token verification failed");
        AppError::unauthorized("Invalid or expired token".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_bearer_token_strips_prefix() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_passes_bare_value_through() {
        assert_eq!(bearer_token("abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_create_and_verify_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token =
            create_access_token(user_id, "test@example.com", UserRole::Student, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Student);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(
            Uuid::new_v4(),
            "test@example.com",
            UserRole::Teacher,
            &config,
        )
        .unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-chars!!".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: -3600, // already expired at issue time
        };

        let token =
            create_access_token(Uuid::new_v4(), "test@example.com", UserRole::Student, &config)
                .unwrap();

        assert!(verify_token(&token, &get_test_jwt_config()).is_err());
    }

    #[test]
    fn test_token_expiry_is_set() {
        let config = get_test_jwt_config();
        let token =
            create_access_token(Uuid::new_v4(), "test@example.com", UserRole::Admin, &config)
                .unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.exp - claims.iat, config.access_token_expiry as usize);
    }
}
