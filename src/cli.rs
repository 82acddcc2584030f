//! Bootstrap commands run from the binary before the server starts.

use sqlx::PgPool;
use uuid::Uuid;

use studyport_core::{AppError, hash_password};
use studyport_models::UserRole;

/// Create an admin account. Admins manage other accounts and subscriptions
/// and can only be created here, never through the API.
pub async fn create_admin(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AppError> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

    if existing.is_some() {
        return Err(AppError::bad_request("Email already exists"));
    }

    let hashed_password = hash_password(password)?;

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO accounts (first_name, last_name, email, password, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(&hashed_password)
    .bind(UserRole::Admin.as_str())
    .fetch_one(db)
    .await
    .map_err(AppError::database)?;

    Ok(id)
}
