//! Subscription tiers and entitlement info.
//!
//! Tiers form a total order: `None < Silver < Platinum`. A route that
//! requires tier T is satisfied by any record whose tier is at least T and
//! whose expiry, when set, lies in the future. The ordering is derived from
//! the enum declaration, so adding a tier forces a deliberate placement
//! decision instead of falling back to an implicit rank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Ordinal subscription level attached to student accounts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    None,
    Silver,
    Platinum,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::None => "none",
            SubscriptionTier::Silver => "silver",
            SubscriptionTier::Platinum => "platinum",
        }
    }

    /// Numeric rank used in client-facing messages. Mirrors the ordering.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::None => 0,
            SubscriptionTier::Silver => 1,
            SubscriptionTier::Platinum => 2,
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored tier string does not name a known tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown subscription tier: {}", self.0)
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for SubscriptionTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SubscriptionTier::None),
            "silver" => Ok(SubscriptionTier::Silver),
            "platinum" => Ok(SubscriptionTier::Platinum),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// Entitlement details attached to the request after a successful
/// subscription check, for downstream handlers to read.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubscriptionInfo {
    pub tier: SubscriptionTier,
    pub expires_at: Option<DateTime<Utc>>,
}
