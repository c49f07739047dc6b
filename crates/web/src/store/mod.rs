//! Store collaborator: list, create and upload operations for bills.
//!
//! Pages talk to the backend only through [`BillStore`]. Two implementations
//! ship with the crate:
//! - [`MockStore`] - fixture-backed, with one-shot rejections and call counts
//! - [`RemoteStore`] - the Billed HTTP API via reqwest

mod fixtures;
pub mod mock;
pub mod remote;

use async_trait::async_trait;
use billed_core::{Bill, Email, FileKey, NewBill};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fixtures::fixture_bills;
pub use mock::{MockStore, StoreOp};
pub use remote::RemoteStore;

/// A store rejection.
///
/// Only the human-readable message (e.g. "Erreur 404") reaches the view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a rejection with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Rejection for an HTTP status code, worded like the API does.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::new(format!("Erreur {code}"))
    }

    /// The message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Wire shape of the list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillCollection {
    pub data: Vec<Bill>,
}

/// A file picked in the new bill form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a selection from a file name and its content.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type reported by the browser.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Upload request: the proof file and the uploader's email.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file: SelectedFile,
    pub email: Option<Email>,
}

/// Where the store put an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub file_url: String,
    pub key: FileKey,
}

/// Backend operations used by the employee pages.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Fetch the bills visible to the current user.
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Persist a new bill and return it with its assigned key.
    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError>;

    /// Store a proof file.
    async fn upload_file(&self, upload: FileUpload) -> Result<UploadReceipt, StoreError>;
}
