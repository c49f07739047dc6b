//! HTTP route handlers for the employee pages.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//! GET  /                          - Redirect to the bills list
//!
//! # Bills
//! GET  /employee/bills            - Bills list (or error panel)
//! GET  /employee/bills/proof      - Proof modal body (?url=)
//!
//! # New bill
//! GET  /employee/bill/new         - Empty form
//! POST /employee/bill/new/file    - Upload the proof (multipart), re-render form
//! POST /employee/bill/new         - Create the bill, redirect to the list
//! ```

pub mod bills;
pub mod new_bill;

use axum::{Router, response::Redirect, routing::get};

use crate::config::WebConfig;
use crate::middleware::create_session_layer;
use crate::navigation::Route;
use crate::state::AppState;

/// Build the application router with its session layer.
pub fn app(state: AppState, config: &WebConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(|| async { Redirect::to(Route::Bills.path()) }))
        .merge(bills::router())
        .merge(new_bill::router())
        .layer(create_session_layer(config))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
