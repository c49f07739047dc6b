//! The logged-in user as persisted in client storage.

use serde::{Deserialize, Serialize};

use super::{Email, UserRole};

/// User blob stored under the `user` key, e.g. `{"type":"Employee","email":"a@a"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub role: UserRole,
    #[serde(default)]
    pub email: Option<Email>,
}

impl User {
    /// Create an employee user.
    #[must_use]
    pub const fn employee(email: Option<Email>) -> Self {
        Self {
            role: UserRole::Employee,
            email,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_email() {
        let user: User = serde_json::from_str(r#"{"type":"Employee"}"#).unwrap();
        assert_eq!(user, User::employee(None));
    }

    #[test]
    fn test_user_with_email() {
        let user: User = serde_json::from_str(r#"{"type":"Admin","email":"a@a"}"#).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.email.unwrap().as_str(), "a@a");
    }

    #[test]
    fn test_user_with_invalid_email_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"type":"Employee","email":""}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"type":"Employee","email":"nobody"}"#).is_err());
    }
}
