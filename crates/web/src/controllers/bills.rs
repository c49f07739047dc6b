//! Bills list controller.

use askama::Template;
use tracing::instrument;

use crate::navigation::{Navigate, Route};
use crate::store::{BillStore, StoreError};
use crate::views::{BillRow, ProofModal};

/// Shows content in the page's proof modal.
pub trait ModalPresenter: Send + Sync {
    /// Current width of the modal, in pixels.
    fn width(&self) -> u32;

    /// Replace the modal body with `body` and open it.
    fn show(&self, body: String);
}

/// The "eye" affordance of a bill row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_url: String,
}

impl EyeIcon {
    #[must_use]
    pub fn new(bill_url: impl Into<String>) -> Self {
        Self {
            bill_url: bill_url.into(),
        }
    }
}

/// Enumerates the eye icons of a rendered list.
pub trait RowEnumerator {
    fn eye_icons(&self) -> Vec<EyeIcon>;
}

impl RowEnumerator for [BillRow] {
    fn eye_icons(&self) -> Vec<EyeIcon> {
        self.iter().map(|row| EyeIcon::new(row.file_url.clone())).collect()
    }
}

/// Controller of the bills list page.
pub struct BillsController<'a> {
    store: &'a dyn BillStore,
    navigator: &'a dyn Navigate,
    modal: &'a dyn ModalPresenter,
}

impl<'a> BillsController<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn BillStore,
        navigator: &'a dyn Navigate,
        modal: &'a dyn ModalPresenter,
    ) -> Self {
        Self {
            store,
            navigator,
            modal,
        }
    }

    /// "New bill" button: go to the submission form.
    #[instrument(skip_all)]
    pub fn on_new_bill_click(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Eye icon: open the modal on the bill's proof image.
    ///
    /// The image takes half of the modal's width.
    ///
    /// # Errors
    ///
    /// Returns error if the modal body fails to render.
    #[instrument(skip_all, fields(bill_url = %icon.bill_url))]
    pub fn on_icon_eye_click(&self, icon: &EyeIcon) -> askama::Result<()> {
        let body = ProofModal {
            url: &icon.bill_url,
            width: self.modal.width() / 2,
        }
        .render()?;
        self.modal.show(body);
        Ok(())
    }

    /// Fetch the bills and map them to list rows.
    ///
    /// # Errors
    ///
    /// Returns the store rejection unchanged, for the caller to render.
    #[instrument(skip_all)]
    pub async fn fetch_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let bills = self.store.list().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch bills");
        })?;
        tracing::debug!(count = bills.len(), "Bills fetched");
        Ok(bills.iter().map(BillRow::from).collect())
    }
}
