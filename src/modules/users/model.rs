use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use studyport_models::SubscriptionTier;

/// DTO for assigning a student's subscription.
///
/// Setting `tier` to `none` clears the subscription; `expires_at` is
/// optional and absent means the subscription does not lapse on its own.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSubscriptionDto {
    pub tier: SubscriptionTier,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_subscription_dto_deserialize() {
        let json = r#"{"tier":"platinum","expires_at":"2026-12-31T00:00:00Z"}"#;
        let dto: UpdateSubscriptionDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.tier, SubscriptionTier::Platinum);
        assert!(dto.expires_at.is_some());
    }

    #[test]
    fn test_update_subscription_dto_without_expiry() {
        let json = r#"{"tier":"silver"}"#;
        let dto: UpdateSubscriptionDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.tier, SubscriptionTier::Silver);
        assert!(dto.expires_at.is_none());
    }
}
