//! New bill controller.
//!
//! Two actions drive the form:
//! - a file change validates and uploads the proof, producing a
//!   [`NewBillDraft`];
//! - a submit reads the fields, creates the bill with the draft's file and
//!   goes back to the list.
//!
//! The draft is a plain value returned by one action and handed to the next.

use billed_core::{
    BillStatus, Email, ExpenseType, ExpenseTypeError, FileKey, FormNumber, NewBill,
    types::amount::DEFAULT_PCT,
};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::instrument;

use crate::navigation::{Navigate, Route};
use crate::storage::{ClientStorage, StorageError, current_user};
use crate::store::{BillStore, FileUpload, SelectedFile, StoreError};

/// Proof file extensions accepted by the upload.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Message shown next to the file input when the type is rejected.
pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers au format jpg, jpeg ou png sont acceptés";

/// Errors from the new bill actions.
#[derive(Debug, Error)]
pub enum NewBillError {
    /// The selected file is not a jpg, jpeg or png image.
    #[error("Invalid file type: {file_name}")]
    InvalidFileType { file_name: String },

    /// The date field is not a `YYYY-MM-DD` date.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// The expense type is not one of the known categories.
    #[error(transparent)]
    InvalidExpenseType(#[from] ExpenseTypeError),

    /// The store rejected the upload or the creation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored user could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fields of the new bill form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ExpenseType,
    ExpenseName,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
}

impl FormField {
    /// Test hook of the field's input element.
    #[must_use]
    pub const fn test_id(self) -> &'static str {
        match self {
            Self::ExpenseType => "expense-type",
            Self::ExpenseName => "expense-name",
            Self::Date => "datepicker",
            Self::Amount => "amount",
            Self::Vat => "vat",
            Self::Pct => "pct",
            Self::Commentary => "commentary",
        }
    }
}

/// Reads the current value of form fields.
pub trait FormReader: Send + Sync {
    fn value(&self, field: FormField) -> String;
}

/// The form's file input and its error indicator.
pub trait FileInput: Send + Sync {
    /// Drop the selected file.
    fn clear(&self);

    /// Show the error indicator with `message`.
    fn show_error(&self, message: &str);

    /// Hide the error indicator.
    fn hide_error(&self);
}

/// Upload state between a file change and the submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillDraft {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub key: Option<FileKey>,
}

/// Whether `file_name` has an accepted image extension (case-insensitive).
#[must_use]
pub fn is_accepted_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Controller of the new bill page.
pub struct NewBillController<'a> {
    store: &'a dyn BillStore,
    navigator: &'a dyn Navigate,
    email: Option<Email>,
}

impl<'a> NewBillController<'a> {
    /// Create the controller, reading the user from `storage`.
    ///
    /// # Errors
    ///
    /// Returns error if the stored user is malformed.
    pub fn new(
        store: &'a dyn BillStore,
        navigator: &'a dyn Navigate,
        storage: &dyn ClientStorage,
    ) -> Result<Self, StorageError> {
        let email = current_user(storage)?.and_then(|user| user.email);
        Ok(Self {
            store,
            navigator,
            email,
        })
    }

    /// File input change: validate the extension, then upload.
    ///
    /// An empty selection leaves `draft` as it is. A rejected file clears
    /// the input and shows the error indicator without calling the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFileType` for a non-image file, or the store
    /// rejection of the upload.
    #[instrument(skip_all, fields(file_name))]
    pub async fn on_file_change(
        &self,
        draft: &NewBillDraft,
        selection: Option<SelectedFile>,
        input: &dyn FileInput,
    ) -> Result<NewBillDraft, NewBillError> {
        let Some(file) = selection else {
            return Ok(draft.clone());
        };
        tracing::Span::current().record("file_name", file.name.as_str());

        if !is_accepted_file(&file.name) {
            tracing::info!("Rejected proof file type");
            input.clear();
            input.show_error(INVALID_FILE_MESSAGE);
            return Err(NewBillError::InvalidFileType {
                file_name: file.name,
            });
        }
        input.hide_error();

        let file_name = file.name.clone();
        let receipt = self
            .store
            .upload_file(FileUpload {
                file,
                email: self.email.clone(),
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Proof upload failed"))?;

        tracing::info!(key = %receipt.key, "Proof uploaded");
        Ok(NewBillDraft {
            file_url: Some(receipt.file_url),
            file_name: Some(file_name),
            key: Some(receipt.key),
        })
    }

    /// Form submit: create the bill, then go back to the list.
    ///
    /// Amount, VAT and percentage are passed to the store as typed; a blank
    /// percentage becomes 20.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDate` or `InvalidExpenseType` for fields the record
    /// can't hold, or the store rejection. Navigation only happens on success.
    #[instrument(skip_all)]
    pub async fn on_submit(
        &self,
        draft: &NewBillDraft,
        form: &dyn FormReader,
    ) -> Result<billed_core::Bill, NewBillError> {
        let bill = self.build_bill(draft, form)?;

        let created = self
            .store
            .create(bill)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Bill creation failed"))?;

        tracing::info!(id = %created.id, "Bill created");
        self.navigator.navigate(Route::Bills);
        Ok(created)
    }

    fn build_bill(
        &self,
        draft: &NewBillDraft,
        form: &dyn FormReader,
    ) -> Result<NewBill, NewBillError> {
        let expense_type = form.value(FormField::ExpenseType).parse::<ExpenseType>()?;

        let raw_date = form.value(FormField::Date);
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| NewBillError::InvalidDate(raw_date.clone()))?;

        let commentary = form.value(FormField::Commentary);

        Ok(NewBill {
            email: self.email.clone(),
            expense_type,
            name: form.value(FormField::ExpenseName),
            amount: FormNumber::coerce(&form.value(FormField::Amount)),
            date,
            vat: FormNumber::coerce(&form.value(FormField::Vat)),
            pct: FormNumber::coerce_or(&form.value(FormField::Pct), DEFAULT_PCT),
            commentary: (!commentary.is_empty()).then_some(commentary),
            file_url: draft.file_url.clone(),
            file_name: draft.file_name.clone(),
            status: BillStatus::Pending,
        })
    }
}
