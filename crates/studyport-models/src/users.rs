//! Account entities read from the account store.
//!
//! The store keeps role and tier as plain text columns. [`AccountRow`] is the
//! raw row shape; [`Account`] is the validated domain entity. Conversion
//! happens at the store boundary: a row with an unknown role is rejected
//! outright, while an unknown tier string degrades to no subscription so a
//! bad row can never grant access it should not have.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::roles::{UnknownRole, UserRole};
use crate::subscriptions::{SubscriptionInfo, SubscriptionTier};

/// Raw account row as stored in PostgreSQL.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub subscription_tier: Option<String>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub subscription_tier: SubscriptionTier,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Entitlement view of this account's subscription fields.
    pub fn subscription(&self) -> SubscriptionInfo {
        SubscriptionInfo {
            tier: self.subscription_tier,
            expires_at: self.subscription_expires_at,
        }
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = UnknownRole;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: UserRole = row.role.parse()?;

        let subscription_tier = match row.subscription_tier.as_deref() {
            None => SubscriptionTier::None,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    account_id = %row.id,
                    tier = raw,
                    "unrecognized subscription tier in store, treating as none"
                );
                SubscriptionTier::None
            }),
        };

        Ok(Account {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
            subscription_tier,
            subscription_expires_at: row.subscription_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
