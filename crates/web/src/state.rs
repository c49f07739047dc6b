//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::BillStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn BillStore>,
}

impl AppState {
    /// Create state around the bills store.
    #[must_use]
    pub fn new(store: Arc<dyn BillStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// The bills store.
    #[must_use]
    pub fn store(&self) -> &dyn BillStore {
        self.inner.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
