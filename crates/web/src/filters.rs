//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Appends the euro sign to an amount.
///
/// Usage in templates: `{{ row.amount|euros }}`
#[askama::filter_fn]
pub fn euros(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value} €"))
}
