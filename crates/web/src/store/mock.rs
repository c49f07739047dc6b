//! In-memory store for tests and local development.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use billed_core::{Bill, BillKey, FileKey, NewBill};
use tokio::sync::Mutex;

use super::{BillStore, FileUpload, StoreError, UploadReceipt, fixture_bills};

/// File URL returned for every upload.
pub const MOCK_FILE_URL: &str = "https://localhost:3456/images/test.jpg";

/// Upload key returned for every upload.
pub const MOCK_FILE_KEY: &str = "1234";

/// Store operation, used to target rejections and read call counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Create,
    UploadFile,
}

#[derive(Debug, Default)]
struct MockState {
    calls: HashMap<StoreOp, usize>,
    rejections: HashMap<StoreOp, VecDeque<StoreError>>,
    created: Vec<NewBill>,
    uploads: Vec<FileUpload>,
}

impl MockState {
    /// Count the call and pop the next queued rejection, if any.
    fn record(&mut self, op: StoreOp) -> Result<(), StoreError> {
        *self.calls.entry(op).or_default() += 1;
        match self.rejections.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Fixture-backed [`BillStore`].
///
/// `list` always resolves with the same bills; created bills are recorded
/// but not added to the list. Rejections are queued per operation and
/// consumed by the next call.
#[derive(Debug)]
pub struct MockStore {
    bills: Vec<Bill>,
    state: Mutex<MockState>,
}

impl MockStore {
    /// Mock store listing the four fixture bills.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bills(fixture_bills())
    }

    /// Mock store listing the given bills.
    #[must_use]
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Make the next call to `op` reject with `message`.
    pub async fn reject_next(&self, op: StoreOp, message: impl Into<String>) {
        self.state
            .lock()
            .await
            .rejections
            .entry(op)
            .or_default()
            .push_back(StoreError::new(message));
    }

    /// Number of times `op` was called, rejected calls included.
    pub async fn calls(&self, op: StoreOp) -> usize {
        self.state
            .lock()
            .await
            .calls
            .get(&op)
            .copied()
            .unwrap_or_default()
    }

    /// Payloads received by `create`, in call order.
    pub async fn created(&self) -> Vec<NewBill> {
        self.state.lock().await.created.clone()
    }

    /// Names of the files received by `upload_file`, in call order.
    pub async fn uploaded_file_names(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .uploads
            .iter()
            .map(|u| u.file.name.clone())
            .collect()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillStore for MockStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.state.lock().await.record(StoreOp::List)?;
        Ok(self.bills.clone())
    }

    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::Create)?;
        state.created.push(bill.clone());
        Ok(bill.into_bill(BillKey::new(uuid::Uuid::new_v4().simple().to_string())))
    }

    async fn upload_file(&self, upload: FileUpload) -> Result<UploadReceipt, StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::UploadFile)?;
        state.uploads.push(upload);
        Ok(UploadReceipt {
            file_url: MOCK_FILE_URL.to_string(),
            key: FileKey::new(MOCK_FILE_KEY),
        })
    }
}
