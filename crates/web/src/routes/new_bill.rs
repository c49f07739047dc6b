//! New bill route handlers.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Form, Router,
    extract::{Multipart, State},
    response::Redirect,
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::controllers::{FileInput, NewBillController, NewBillDraft, NewBillError};
use crate::error::{AppError, set_sentry_user};
use crate::navigation::{RedirectNavigator, Route};
use crate::state::AppState;
use crate::storage::{MemoryStorage, current_user};
use crate::store::SelectedFile;
use crate::views::{NewBillForm, NewBillPage};

/// Multipart field holding the proof file.
const FILE_FIELD: &str = "file";

/// Build the new bill router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(Route::NewBill.path(), get(form).post(submit))
        .route("/employee/bill/new/file", post(upload))
}

/// File input state collected while the controller runs, rendered back
/// into the form.
#[derive(Debug, Default)]
pub struct RenderedFileInput {
    cleared: AtomicBool,
    error: Mutex<Option<String>>,
}

impl RenderedFileInput {
    /// Whether the selection was dropped.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }

    /// Message of the error indicator, when shown.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.lock().ok().and_then(|slot| slot.clone())
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut slot) = self.error.lock() {
            *slot = message;
        }
    }
}

impl FileInput for RenderedFileInput {
    fn clear(&self) {
        self.cleared.store(true, Ordering::SeqCst);
    }

    fn show_error(&self, message: &str) {
        self.set_error(Some(message.to_string()));
    }

    fn hide_error(&self) {
        self.set_error(None);
    }
}

/// Snapshot the session's client storage and tag Sentry with the user.
async fn session_storage(session: &Session) -> Result<MemoryStorage, AppError> {
    let storage = MemoryStorage::from_session(session).await?;
    let email = current_user(&storage)?.and_then(|user| user.email);
    set_sentry_user(email.as_ref().map(billed_core::Email::as_str));
    Ok(storage)
}

/// Split a multipart body into the form values and the selected file.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(NewBillForm, Option<SelectedFile>), AppError> {
    let bad_request = |e: axum::extract::multipart::MultipartError| AppError::BadRequest(e.to_string());

    let mut form = NewBillForm::default();
    let mut selection = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(bad_request)?;
            if file_name.is_empty() {
                continue;
            }
            let mut file = SelectedFile::new(file_name, bytes.to_vec());
            if let Some(content_type) = content_type {
                file = file.with_content_type(content_type);
            }
            selection = Some(file);
        } else {
            let value = field.text().await.map_err(bad_request)?;
            form.set(&name, value);
        }
    }

    Ok((form, selection))
}

/// Empty new bill form.
///
/// GET /employee/bill/new
#[instrument(skip_all)]
async fn form() -> NewBillPage {
    NewBillPage::default()
}

/// File input change: validate and upload the proof, then return the form
/// with the upload state or the error indicator. A rejected upload is shown
/// on the form with status 200 so htmx swaps it in.
///
/// POST /employee/bill/new/file
#[instrument(skip_all)]
async fn upload(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<NewBillPage, AppError> {
    let storage = session_storage(&session).await?;
    let (form, selection) = read_multipart(multipart).await?;

    let navigator = RedirectNavigator::default();
    let controller = NewBillController::new(state.store(), &navigator, &storage)?;
    let input = RenderedFileInput::default();

    let draft = match controller
        .on_file_change(&form.draft(), selection, &input)
        .await
    {
        Ok(draft) => draft,
        Err(NewBillError::InvalidFileType { .. }) => NewBillDraft::default(),
        // The form stays on screen with the previous upload, if any.
        Err(NewBillError::Store(e)) => {
            input.show_error(e.message());
            form.draft()
        }
        Err(e) => return Err(e.into()),
    };
    let draft = if input.is_cleared() {
        NewBillDraft::default()
    } else {
        draft
    };

    Ok(NewBillPage::new(form.with_draft(&draft), input.error()))
}

/// Form submit: create the bill and go back to the list.
///
/// POST /employee/bill/new
#[instrument(skip_all)]
async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewBillForm>,
) -> Result<Redirect, AppError> {
    let storage = session_storage(&session).await?;

    let navigator = RedirectNavigator::default();
    let controller = NewBillController::new(state.store(), &navigator, &storage)?;
    controller.on_submit(&form.draft(), &form).await?;

    let target = navigator.target().unwrap_or(Route::Bills);
    Ok(Redirect::to(target.path()))
}
