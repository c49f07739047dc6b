//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Review status of a bill.
///
/// New bills are always created as [`BillStatus::Pending`]; an admin later
/// accepts or refuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Human label shown on the bills list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refusé",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Refused => write!(f, "refused"),
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "refused" => Ok(Self::Refused),
            _ => Err(format!("invalid bill status: {s}")),
        }
    }
}

/// Role of the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Submits bills and sees their own list.
    Employee,
    /// Reviews bills from the dashboard.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => write!(f, "Employee"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refusé");
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&BillStatus::Refused).unwrap();
        assert_eq!(json, "\"refused\"");

        let parsed: BillStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(parsed, BillStatus::Accepted);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("pending".parse::<BillStatus>().unwrap(), BillStatus::Pending);
        assert!("approved".parse::<BillStatus>().is_err());
    }

    #[test]
    fn test_user_role_serde() {
        let role: UserRole = serde_json::from_str("\"Employee\"").unwrap();
        assert_eq!(role, UserRole::Employee);
        assert_eq!(UserRole::Admin.to_string(), "Admin");
    }
}
