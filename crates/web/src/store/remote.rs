//! Billed API client.
//!
//! Endpoints (relative to the configured base URL):
//!
//! ```text
//! GET  /bills        - list bills        -> { "data": [Bill] }
//! POST /bills        - create a bill     -> Bill
//! POST /bills/file   - upload a proof    -> { "fileUrl", "key" }
//! ```

use async_trait::async_trait;
use billed_core::{Bill, NewBill};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::{BillCollection, BillStore, FileUpload, StoreError, UploadReceipt};

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        err.status()
            .map_or_else(|| Self::new(err.to_string()), |s| Self::status(s.as_u16()))
    }
}

/// [`BillStore`] backed by the Billed HTTP API.
#[derive(Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RemoteStore {
    /// Create a client for the API at `base_url`.
    ///
    /// `token` is sent as a bearer token on every request.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(base_url: &str, token: Option<&SecretString>) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| StoreError::new(format!("Invalid API token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Decode a JSON body, rejecting non-success statuses first.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Billed API returned an error");
            return Err(StoreError::status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::new(format!("Invalid API response: {e}")))
    }
}

#[async_trait]
impl BillStore for RemoteStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let response = self.client.get(self.url("bills")).send().await?;
        let collection: BillCollection = Self::decode(response).await?;
        tracing::debug!(count = collection.data.len(), "Bills listed");
        Ok(collection.data)
    }

    #[instrument(skip(self, bill), fields(name = %bill.name))]
    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError> {
        let response = self
            .client
            .post(self.url("bills"))
            .json(&bill)
            .send()
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, upload), fields(file_name = %upload.file.name))]
    async fn upload_file(&self, upload: FileUpload) -> Result<UploadReceipt, StoreError> {
        let FileUpload { file, email } = upload;

        let mut part = Part::bytes(file.bytes).file_name(file.name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| StoreError::new(format!("Invalid content type: {e}")))?;
        }

        let mut form = Form::new().part("file", part);
        if let Some(email) = email {
            form = form.text("email", email.as_str().to_owned());
        }

        let response = self
            .client
            .post(self.url("bills/file"))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }
}
