//! Page views.
//!
//! Each view is an Askama template and a pure function of its fields:
//! rendering has no side effects and never touches the store.
//!
//! - [`bills`] - the bills list, with its loading and error states
//! - [`new_bill`] - the bill submission form

pub mod bills;
pub mod new_bill;

pub use bills::{BillRow, BillsPage, BillsViewState, ProofModal};
pub use new_bill::{NewBillForm, NewBillPage};

/// Vertical navigation icon highlighted on the bills list.
pub(crate) const ICON_WINDOW: &str = "window";

/// Vertical navigation icon highlighted on the new bill form.
pub(crate) const ICON_MAIL: &str = "mail";
