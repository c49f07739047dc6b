//! HTTP middleware for the employee pages.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)

mod session;

pub use session::{SESSION_COOKIE_NAME, create_session_layer};
