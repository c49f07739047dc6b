//! Core types for Billed.
//!
//! This module provides type-safe wrappers for the expense report domain.

pub mod amount;
pub mod bill;
pub mod date;
pub mod email;
pub mod id;
pub mod status;
pub mod user;

pub use amount::FormNumber;
pub use bill::{Bill, ExpenseType, ExpenseTypeError, NewBill};
pub use date::format_date;
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
pub use user::User;
