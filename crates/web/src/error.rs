//! Unified error handling for the web pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::controllers::NewBillError;
use crate::storage::StorageError;
use crate::store::StoreError;
use crate::views::{BillsPage, BillsViewState};

/// Application-level error type for the employee pages.
#[derive(Debug, Error)]
pub enum AppError {
    /// The bills store rejected a call.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Client storage could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A page failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<NewBillError> for AppError {
    fn from(err: NewBillError) -> Self {
        match err {
            NewBillError::Store(e) => Self::Store(e),
            NewBillError::Storage(e) => Self::Storage(e),
            e @ (NewBillError::InvalidFileType { .. }
            | NewBillError::InvalidDate(_)
            | NewBillError::InvalidExpenseType(_)) => Self::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Storage(_) | Self::Template(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Store rejections are shown to the employee in the list's error panel
        if let Self::Store(e) = &self {
            tracing::warn!(error = %e, "Store rejected request");
            return match BillsPage::new(BillsViewState::failed(e.message())).render() {
                Ok(html) => (StatusCode::BAD_GATEWAY, Html(html)).into_response(),
                Err(render) => Self::Template(render).into_response(),
            };
        }

        let status = match &self {
            Self::Storage(_) | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage(_) | Self::Template(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the employee's email.
pub fn set_sentry_user(email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(email.map(|email| sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}
