use sqlx::PgPool;
use tracing::instrument;

use studyport_auth::create_access_token;
use studyport_config::JwtConfig;
use studyport_core::{AppError, hash_password, verify_password};
use studyport_models::{Account, AccountRow, UserRole};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Self-registration always creates a student account with no
    /// subscription. Teachers and admins are provisioned separately.
    #[instrument(skip(dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<Account, AppError> {
        let existing: Option<uuid::Uuid> =
            sqlx::query_scalar("SELECT id FROM accounts WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request("Email already exists"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts (first_name, last_name, email, password, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, first_name, last_name, email, role, subscription_tier,
                       subscription_expires_at, created_at, updated_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(UserRole::Student.as_str())
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Account::try_from(row)
            .map_err(|e| AppError::internal_error(format!("Malformed account row: {}", e)))
    }

    #[instrument(skip(dto))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AccountWithPassword {
            #[sqlx(flatten)]
            account: AccountRow,
            password: String,
        }

        let found = sqlx::query_as::<_, AccountWithPassword>(
            "SELECT id, first_name, last_name, email, role, subscription_tier,
                    subscription_expires_at, created_at, updated_at, password
             FROM accounts WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &found.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let account = Account::try_from(found.account)
            .map_err(|e| AppError::internal_error(format!("Malformed account row: {}", e)))?;

        let access_token =
            create_access_token(account.id, &account.email, account.role, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            account,
        })
    }
}
