use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use studyport_core::AppError;
use studyport_models::{Account, AccountRow, SubscriptionTier};

use super::model::UpdateSubscriptionDto;

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, email, role, subscription_tier, \
     subscription_expires_at, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Fetch a single account by id, fresh from the store.
    ///
    /// The subscription gate calls this on every gated request; the absence
    /// of caching here is what keeps entitlement decisions current.
    #[instrument]
    pub async fn find_account_by_id(db: &PgPool, id: Uuid) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        row.map(Account::try_from)
            .transpose()
            .map_err(|e| AppError::internal_error(format!("Malformed account row: {}", e)))
    }

    #[instrument]
    pub async fn get_accounts(db: &PgPool) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        rows.into_iter()
            .map(|row| {
                Account::try_from(row)
                    .map_err(|e| AppError::internal_error(format!("Malformed account row: {}", e)))
            })
            .collect()
    }

    /// Assign or clear a student's subscription.
    #[instrument]
    pub async fn update_subscription(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubscriptionDto,
    ) -> Result<Account, AppError> {
        // Tier `none` is stored as NULL, matching accounts that never
        // subscribed.
        let tier_value = match dto.tier {
            SubscriptionTier::None => None,
            tier => Some(tier.as_str()),
        };

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE accounts
             SET subscription_tier = $2, subscription_expires_at = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(tier_value)
        .bind(dto.expires_at)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

        Account::try_from(row)
            .map_err(|e| AppError::internal_error(format!("Malformed account row: {}", e)))
    }
}
