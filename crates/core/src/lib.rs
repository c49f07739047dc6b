//! Billed Core - Shared domain types.
//!
//! This crate provides the types exchanged between the Billed pages and the
//! store collaborator:
//! - [`Bill`] and [`NewBill`] - expense report records
//! - [`User`] - the logged-in user persisted in client storage
//! - [`format_date`] - the French short date shown on the bills list
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no rendering. Stores and views live in `billed-web`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
