//! Numeric form fields that may arrive as text.
//!
//! Amount, VAT and percentage come from free-text inputs. The store is the
//! authority on their validity, so a value that does not parse is carried
//! through untouched instead of being rejected here.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Default VAT percentage applied when the `pct` field is left empty.
pub const DEFAULT_PCT: i64 = 20;

/// A number typed into a form, or the raw text when it isn't one.
///
/// Serializes as a JSON number or string, matching the records the Billed
/// API returns (`"amount": 400`, `"vat": "80"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Integer(i64),
    Text(String),
}

impl FormNumber {
    /// Coerce raw field text.
    ///
    /// ```
    /// use billed_core::FormNumber;
    ///
    /// assert_eq!(FormNumber::coerce(" 245 "), FormNumber::Integer(245));
    /// assert_eq!(FormNumber::coerce("12,50"), FormNumber::Text("12,50".into()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_owned()), Self::Integer)
    }

    /// Coerce raw field text, using `default` when the field is blank.
    #[must_use]
    pub fn coerce_or(raw: &str, default: i64) -> Self {
        if raw.trim().is_empty() {
            Self::Integer(default)
        } else {
            Self::coerce(raw)
        }
    }

    /// Returns the integer value, if this is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl Default for FormNumber {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for FormNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
