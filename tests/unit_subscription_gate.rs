use chrono::{Duration, Utc};
use uuid::Uuid;

use studyport::middleware::subscription::{SubscriptionDenial, evaluate_subscription};
use studyport_core::AppError;
use studyport_models::{Account, SubscriptionTier, UserRole};

fn student_account(tier: SubscriptionTier) -> Account {
    Account {
        id: Uuid::new_v4(),
        first_name: "Test".to_string(),
        last_name: "Student".to_string(),
        email: "student@example.com".to_string(),
        role: UserRole::Student,
        subscription_tier: tier,
        subscription_expires_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_missing_account_yields_user_not_found() {
    let err = evaluate_subscription(None, SubscriptionTier::Silver, Utc::now()).unwrap_err();
    assert_eq!(err.code(), "USER_NOT_FOUND");
    assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
}

#[test]
fn test_no_subscription_yields_no_subscription_code() {
    let account = student_account(SubscriptionTier::None);
    let err = evaluate_subscription(Some(&account), SubscriptionTier::Silver, Utc::now())
        .unwrap_err();
    assert_eq!(err.code(), "NO_SUBSCRIPTION");
}

#[test]
fn test_silver_rejected_when_platinum_required() {
    let account = student_account(SubscriptionTier::Silver);
    let err = evaluate_subscription(Some(&account), SubscriptionTier::Platinum, Utc::now())
        .unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_SUBSCRIPTION");
    assert_eq!(
        err,
        SubscriptionDenial::InsufficientSubscription {
            required: SubscriptionTier::Platinum,
            current: SubscriptionTier::Silver,
        }
    );
}

#[test]
fn test_expired_platinum_rejected_despite_sufficient_rank() {
    let now = Utc::now();
    let expired_at = now - Duration::days(1);

    let mut account = student_account(SubscriptionTier::Platinum);
    account.subscription_expires_at = Some(expired_at);

    let err = evaluate_subscription(Some(&account), SubscriptionTier::Platinum, now).unwrap_err();
    assert_eq!(err.code(), "SUBSCRIPTION_EXPIRED");
}

#[test]
fn test_silver_satisfies_silver() {
    let account = student_account(SubscriptionTier::Silver);
    let info = evaluate_subscription(Some(&account), SubscriptionTier::Silver, Utc::now()).unwrap();
    assert_eq!(info.tier, SubscriptionTier::Silver);
}

#[test]
fn test_platinum_satisfies_silver() {
    let account = student_account(SubscriptionTier::Platinum);
    let info = evaluate_subscription(Some(&account), SubscriptionTier::Silver, Utc::now()).unwrap();
    assert_eq!(info.tier, SubscriptionTier::Platinum);
}

#[test]
fn test_expiry_exactly_now_is_not_expired() {
    // Expiry must be strictly in the past to reject.
    let now = Utc::now();
    let mut account = student_account(SubscriptionTier::Silver);
    account.subscription_expires_at = Some(now);

    assert!(evaluate_subscription(Some(&account), SubscriptionTier::Silver, now).is_ok());
}

#[test]
fn test_rejections_are_checked_in_order() {
    // A missing subscription on a vanished-expiry account reports
    // NO_SUBSCRIPTION before anything else.
    let now = Utc::now();
    let mut account = student_account(SubscriptionTier::None);
    account.subscription_expires_at = Some(now - Duration::days(30));

    let err = evaluate_subscription(Some(&account), SubscriptionTier::Platinum, now).unwrap_err();
    assert_eq!(err.code(), "NO_SUBSCRIPTION");
}

#[test]
fn test_gate_is_idempotent_for_unchanged_state() {
    let now = Utc::now();
    let mut account = student_account(SubscriptionTier::Platinum);
    account.subscription_expires_at = Some(now + Duration::days(7));

    let first = evaluate_subscription(Some(&account), SubscriptionTier::Platinum, now);
    let second = evaluate_subscription(Some(&account), SubscriptionTier::Platinum, now);
    assert_eq!(first, second);
}

#[test]
fn test_denial_converts_to_coded_response() {
    let err: AppError = SubscriptionDenial::SubscriptionExpired {
        expired_at: Utc::now(),
    }
    .into();
    assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(err.code, Some("SUBSCRIPTION_EXPIRED"));
}
