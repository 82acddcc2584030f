//! System role enumeration.
//!
//! Every account carries exactly one role. Roles are compared for equality
//! only; there is no hierarchy between them. A route that requires the
//! `teacher` role is not satisfied by an `admin` token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The role embedded in an account and in issued access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            "admin" => Ok(UserRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("student".parse::<UserRole>(), Ok(UserRole::Student));
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = "superuser".parse::<UserRole>().unwrap_err();
        assert_eq!(err, UnknownRole("superuser".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for role in [UserRole::Student, UserRole::Teacher, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&UserRole::Teacher).unwrap();
        assert_eq!(json, r#""teacher""#);

        let role: UserRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_serde_rejects_unknown() {
        assert!(serde_json::from_str::<UserRole>(r#""root""#).is_err());
    }
}
