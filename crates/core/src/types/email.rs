//! Email address of a bill owner.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not `local@domain`.
    #[error("email must look like local@domain")]
    Malformed,
}

/// An employee email address.
///
/// Bills are attributed to the email stored alongside the user in client
/// storage. Only the shape is checked: one `@` with text on both sides. The
/// Billed API accepts short test addresses such as `a@a`.
///
/// ```
/// use billed_core::Email;
///
/// assert!(Email::parse("employee@test.tld").is_ok());
/// assert!(Email::parse("a@a").is_ok());
/// assert!(Email::parse("employee").is_err());
/// ```
///
/// Deserializing goes through [`Email::parse`], so a stored blob can't carry
/// an address the parser would refuse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// or not of the form `local@domain`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("employee@test.tld").is_ok());
        assert!(Email::parse("first.last+bills@company.fr").is_ok());
        assert!(Email::parse("a@a").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let email = Email::parse("  employee@test.tld ").unwrap();
        assert_eq!(email.as_str(), "employee@test.tld");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("employee"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("@test.tld"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("employee@"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("a@b@c"), Err(EmailError::Malformed));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@test.tld", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let email: Email = serde_json::from_str("\"a@a\"").unwrap();
        assert_eq!(email.to_string(), "a@a");
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@a\"");
    }

    #[test]
    fn test_deserialize_validates() {
        let email: Email = serde_json::from_str("\" employee@test.tld \"").unwrap();
        assert_eq!(email.as_str(), "employee@test.tld");

        assert!(serde_json::from_str::<Email>("\"\"").is_err());
        assert!(serde_json::from_str::<Email>("\"employee\"").is_err());
        assert!(serde_json::from_str::<Email>("\"a@b@c\"").is_err());
    }
}
