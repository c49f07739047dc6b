//! Client-side routes and the navigation capability.

use std::sync::OnceLock;

use askama::Template;

use crate::views::{BillsPage, BillsViewState, NewBillPage};

/// Employee pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    /// URL path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Bills => "/employee/bills",
            Self::NewBill => "/employee/bill/new",
        }
    }

    /// Route for a URL path, if it is one of the employee pages.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        [Self::Bills, Self::NewBill]
            .into_iter()
            .find(|r| r.path() == path.trim_end_matches('/'))
    }
}

/// Moves the user to another page.
pub trait Navigate: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Markup of a page reached by navigation, before any data is fetched.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_route(route: Route) -> askama::Result<String> {
    match route {
        Route::Bills => BillsPage::new(BillsViewState::default()).render(),
        Route::NewBill => NewBillPage::default().render(),
    }
}

/// Navigator that remembers where it was sent, for turning into a redirect.
///
/// Only the first navigation is kept.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: OnceLock<Route>,
}

impl RedirectNavigator {
    /// The route requested by the controller, if any.
    #[must_use]
    pub fn target(&self) -> Option<Route> {
        self.target.get().copied()
    }
}

impl Navigate for RedirectNavigator {
    fn navigate(&self, route: Route) {
        if self.target.set(route).is_err() {
            tracing::debug!(route = route.path(), "Navigation already requested");
        }
    }
}
