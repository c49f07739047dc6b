//! Bills list route handlers.

use std::sync::OnceLock;

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::controllers::{BillsController, EyeIcon, ModalPresenter};
use crate::error::AppError;
use crate::navigation::{RedirectNavigator, Route};
use crate::state::AppState;
use crate::views::{BillsPage, BillsViewState};

/// Width of the proof modal body, in pixels.
pub const MODAL_WIDTH: u32 = 800;

/// Build the bills router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(Route::Bills.path(), get(index))
        .route("/employee/bills/proof", get(proof))
}

/// Modal that keeps the body it was asked to show, for returning as a
/// fragment the page swaps into `.modal-body`.
#[derive(Debug)]
pub struct FragmentModal {
    width: u32,
    body: OnceLock<String>,
}

impl FragmentModal {
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self {
            width,
            body: OnceLock::new(),
        }
    }

    /// The body shown, if any.
    #[must_use]
    pub fn into_body(self) -> Option<String> {
        self.body.into_inner()
    }
}

impl ModalPresenter for FragmentModal {
    fn width(&self) -> u32 {
        self.width
    }

    fn show(&self, body: String) {
        let _ = self.body.set(body);
    }
}

/// Query parameters of the proof fragment.
#[derive(Debug, Deserialize)]
pub struct ProofQuery {
    url: String,
}

/// Bills list.
///
/// GET /employee/bills
#[instrument(skip_all)]
async fn index(State(state): State<AppState>) -> Result<BillsPage, AppError> {
    let navigator = RedirectNavigator::default();
    let modal = FragmentModal::new(MODAL_WIDTH);
    let controller = BillsController::new(state.store(), &navigator, &modal);

    let rows = controller.fetch_bills().await?;
    Ok(BillsPage::new(BillsViewState::loaded(rows)))
}

/// Proof modal body for a bill's file.
///
/// GET /employee/bills/proof?url=
#[instrument(skip_all, fields(url = %query.url))]
async fn proof(
    State(state): State<AppState>,
    Query(query): Query<ProofQuery>,
) -> Result<Html<String>, AppError> {
    let navigator = RedirectNavigator::default();
    let modal = FragmentModal::new(MODAL_WIDTH);
    BillsController::new(state.store(), &navigator, &modal)
        .on_icon_eye_click(&EyeIcon::new(query.url))?;

    Ok(Html(modal.into_body().unwrap_or_default()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_modal_keeps_first_body() {
        let modal = FragmentModal::new(MODAL_WIDTH);
        assert_eq!(modal.width(), 800);

        modal.show("<img>".to_string());
        modal.show("<p>".to_string());
        assert_eq!(modal.into_body().unwrap(), "<img>");
    }
}
