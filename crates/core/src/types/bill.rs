//! Expense report records.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BillKey, BillStatus, Email, FormNumber};

/// Error returned when an expense category name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown expense type: {0}")]
pub struct ExpenseTypeError(pub String);

/// Expense category of a bill.
///
/// Serialized with the French labels used by the Billed API and the select
/// options of the new bill form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    #[serde(rename = "Transports")]
    Transports,
    #[serde(rename = "Restaurants et bars")]
    Restaurants,
    #[serde(rename = "Hôtel et logement")]
    Hotel,
    #[serde(rename = "Services en ligne")]
    OnlineServices,
    #[serde(rename = "IT et électronique")]
    It,
    #[serde(rename = "Equipement et matériel")]
    Equipment,
    #[serde(rename = "Fournitures de bureau")]
    OfficeSupplies,
}

impl ExpenseType {
    /// All categories, in the order the form lists them.
    pub const ALL: [Self; 7] = [
        Self::Transports,
        Self::Restaurants,
        Self::Hotel,
        Self::OnlineServices,
        Self::It,
        Self::Equipment,
        Self::OfficeSupplies,
    ];

    /// French label, also the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transports => "Transports",
            Self::Restaurants => "Restaurants et bars",
            Self::Hotel => "Hôtel et logement",
            Self::OnlineServices => "Services en ligne",
            Self::It => "IT et électronique",
            Self::Equipment => "Equipement et matériel",
            Self::OfficeSupplies => "Fournitures de bureau",
        }
    }

    const fn alias(self) -> &'static str {
        match self {
            Self::Transports => "transport",
            Self::Restaurants => "restaurant",
            Self::Hotel => "hotel",
            Self::OnlineServices => "online",
            Self::It => "it",
            Self::Equipment => "equipment",
            Self::OfficeSupplies => "office",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExpenseType {
    type Err = ExpenseTypeError;

    /// Accepts the French label or a short English alias, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == needle || t.alias() == needle)
            .ok_or_else(|| ExpenseTypeError(s.to_owned()))
    }
}

/// A bill as stored by the Billed API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillKey,
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    #[serde(default)]
    pub amount: FormNumber,
    pub date: NaiveDate,
    #[serde(default)]
    pub vat: FormNumber,
    #[serde(default)]
    pub pct: FormNumber,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

/// Payload sent to the store when an employee submits a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub email: Option<Email>,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: FormNumber,
    pub date: NaiveDate,
    pub vat: FormNumber,
    pub pct: FormNumber,
    pub commentary: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

impl NewBill {
    /// Attach the key assigned by the store.
    #[must_use]
    pub fn into_bill(self, id: BillKey) -> Bill {
        Bill {
            id,
            email: self.email,
            name: self.name,
            expense_type: self.expense_type,
            amount: self.amount,
            date: self.date,
            vat: self.vat,
            pct: self.pct,
            commentary: self.commentary,
            file_url: self.file_url,
            file_name: self.file_name,
            status: self.status,
            comment_admin: None,
        }
    }
}
