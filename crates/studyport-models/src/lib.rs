//! # Studyport Models
//!
//! Domain models for the Studyport API.
//!
//! This crate provides the typed entities shared across the application:
//!
//! - [`roles`]: the system role enumeration
//! - [`subscriptions`]: subscription tiers and entitlement info
//! - [`users`]: account entities read from the account store

pub mod roles;
pub mod subscriptions;
pub mod users;

// Re-export commonly used types at crate root
pub use roles::UserRole;
pub use subscriptions::{SubscriptionInfo, SubscriptionTier};
pub use users::{Account, AccountRow};
