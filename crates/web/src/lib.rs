//! Billed employee pages library.
//!
//! This crate provides the employee side of Billed as a library, allowing it
//! to be tested and reused:
//! - [`views`] - the bills list and new bill form markup
//! - [`controllers`] - the page actions, driven through capability traits
//! - [`store`] - the backend collaborator (mock and HTTP)
//! - [`routes`] - the axum surface serving the pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controllers;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod views;
