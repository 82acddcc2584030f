//! Tiered subscription gating for student content routes.
//!
//! Teachers and admins bypass this gate entirely: entitlement is a
//! student-only concept. For students the gate performs exactly one fresh
//! read against the account store per request (no caching, so a tier change
//! takes effect on the very next request) and then decides from that
//! snapshot.
//!
//! Every rejection carries a machine-readable `code` alongside the human
//! message; clients branch on the code, so the set below is a stable
//! contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::middleware::subscription::SilverAccess;
//!
//! pub async fn list_materials(
//!     SilverAccess(subscription): SilverAccess,
//! ) -> Result<Json<Vec<Material>>, AppError> {
//!     // Students reach this point only with an active silver-or-better
//!     // subscription; `subscription` is `None` for teachers and admins.
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use chrono::{DateTime, Utc};

use studyport_core::AppError;
use studyport_models::{Account, SubscriptionInfo, SubscriptionTier, UserRole};

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Why a student was denied access to gated content.
///
/// Variants are listed in evaluation order; the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionDenial {
    /// The token's subject no longer resolves to an account.
    UserNotFound,

    /// The account has no subscription at all.
    NoSubscription,

    /// The subscription tier is below what the route requires.
    InsufficientSubscription {
        required: SubscriptionTier,
        current: SubscriptionTier,
    },

    /// The subscription tier would suffice, but it has lapsed.
    SubscriptionExpired { expired_at: DateTime<Utc> },
}

impl SubscriptionDenial {
    /// Stable machine-readable code for client-side branching.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoSubscription => "NO_SUBSCRIPTION",
            Self::InsufficientSubscription { .. } => "INSUFFICIENT_SUBSCRIPTION",
            Self::SubscriptionExpired { .. } => "SUBSCRIPTION_EXPIRED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::UserNotFound => "User account not found".to_string(),
            Self::NoSubscription => {
                "An active subscription is required to access this content".to_string()
            }
            Self::InsufficientSubscription { required, current } => format!(
                "This content requires a {} subscription, but the current tier is {}",
                required, current
            ),
            Self::SubscriptionExpired { expired_at } => {
                format!("Subscription expired on {}", expired_at.to_rfc3339())
            }
        }
    }
}

impl From<SubscriptionDenial> for AppError {
    fn from(denial: SubscriptionDenial) -> Self {
        AppError::with_code(denial.status(), denial.message(), denial.code())
    }
}

/// Decide entitlement from a point-in-time account snapshot.
///
/// Pure: given the same snapshot, required tier, and clock reading, the
/// decision is always the same. Checks run in a fixed order and the first
/// failure wins. An expired platinum subscription is reported as expired,
/// not as insufficient.
pub fn evaluate_subscription(
    account: Option<&Account>,
    required_tier: SubscriptionTier,
    now: DateTime<Utc>,
) -> Result<SubscriptionInfo, SubscriptionDenial> {
    let account = account.ok_or(SubscriptionDenial::UserNotFound)?;

    let tier = account.subscription_tier;
    if tier == SubscriptionTier::None {
        return Err(SubscriptionDenial::NoSubscription);
    }

    if tier < required_tier {
        return Err(SubscriptionDenial::InsufficientSubscription {
            required: required_tier,
            current: tier,
        });
    }

    if let Some(expired_at) = account
        .subscription_expires_at
        .filter(|expires_at| *expires_at < now)
    {
        return Err(SubscriptionDenial::SubscriptionExpired { expired_at });
    }

    Ok(SubscriptionInfo {
        tier,
        expires_at: account.subscription_expires_at,
    })
}

/// Run the subscription gate for an authenticated identity.
///
/// Returns `Ok(None)` for teachers and admins (bypass), and
/// `Ok(Some(info))` for a student whose subscription satisfies the required
/// tier. A store failure is logged in full here and surfaced to the caller
/// only as a generic 500 with the `SUBSCRIPTION_CHECK_ERROR` code.
pub async fn check_subscription(
    state: &AppState,
    auth_user: &AuthUser,
    required_tier: SubscriptionTier,
) -> Result<Option<SubscriptionInfo>, AppError> {
    if auth_user.role() != UserRole::Student {
        return Ok(None);
    }

    let user_id = auth_user.user_id()?;

    let account = UserService::find_account_by_id(&state.db, user_id)
        .await
        .map_err(|err| {
            tracing::error!(
                user_id = %user_id,
                error = ?err,
                "subscription check failed against the account store"
            );
            AppError::with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to verify subscription status",
                "SUBSCRIPTION_CHECK_ERROR",
            )
        })?;

    let info = evaluate_subscription(account.as_ref(), required_tier, Utc::now())?;
    Ok(Some(info))
}

/// Extractor gating a route at the silver tier.
///
/// Holds the subscription details for student callers, `None` for bypassed
/// roles.
#[derive(Debug, Clone)]
pub struct SilverAccess(pub Option<SubscriptionInfo>);

impl FromRequestParts<AppState> for SilverAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let info = check_subscription(state, &auth_user, SubscriptionTier::Silver).await?;
        Ok(SilverAccess(info))
    }
}

/// Extractor gating a route at the platinum tier.
#[derive(Debug, Clone)]
pub struct PlatinumAccess(pub Option<SubscriptionInfo>);

impl FromRequestParts<AppState> for PlatinumAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let info = check_subscription(state, &auth_user, SubscriptionTier::Platinum).await?;
        Ok(PlatinumAccess(info))
    }
}
