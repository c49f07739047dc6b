//! Integration tests for Billed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p billed-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `bills` - bills list page: rendering states, controller actions, HTTP
//! - `new_bill` - new bill form: file validation, upload, submit, HTTP
//!
//! Pages are checked through [`Screen`], which answers the same questions a
//! DOM query would (test ids, attributes, text) against rendered markup.
//! Controllers are driven with the recording fakes below.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use billed_web::config::WebConfig;
use billed_web::controllers::{FileInput, ModalPresenter};
use billed_web::navigation::{Navigate, Route, render_route};
use billed_web::routes;
use billed_web::state::AppState;
use billed_web::store::BillStore;
use regex::Regex;

/// Rendered page markup with DOM-like queries.
#[derive(Debug, Clone)]
pub struct Screen {
    html: String,
}

impl Screen {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Raw markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of elements carrying `data-testid="{id}"`.
    #[must_use]
    pub fn count_by_test_id(&self, id: &str) -> usize {
        let pattern = format!(r#"data-testid="{}""#, regex::escape(id));
        Regex::new(&pattern)
            .expect("valid test id pattern")
            .find_iter(&self.html)
            .count()
    }

    /// Whether an element carries `data-testid="{id}"`.
    #[must_use]
    pub fn has_test_id(&self, id: &str) -> bool {
        self.count_by_test_id(id) > 0
    }

    /// Whether the markup shows `text`.
    #[must_use]
    pub fn has_text(&self, text: &str) -> bool {
        self.html.contains(text)
    }

    /// Values of `attr` on the element with `data-testid="{id}"`, in order.
    #[must_use]
    pub fn attrs_by_test_id(&self, id: &str, attr: &str) -> Vec<String> {
        let tag = Regex::new(&format!(
            r#"<[a-z]+[^>]*data-testid="{}"[^>]*>"#,
            regex::escape(id)
        ))
        .expect("valid element pattern");
        let value =
            Regex::new(&format!(r#"\s{}="([^"]*)""#, regex::escape(attr))).expect("valid attr pattern");

        tag.find_iter(&self.html)
            .filter_map(|m| value.captures(m.as_str()))
            .filter_map(|c| c.get(1).map(|v| v.as_str().to_string()))
            .collect()
    }

    /// Whether every element with `data-testid="{id}"` carries `attr`,
    /// valued or bare (`required`). False when no element matches.
    #[must_use]
    pub fn test_id_has_attr(&self, id: &str, attr: &str) -> bool {
        let tag = Regex::new(&format!(
            r#"<[a-z]+[^>]*data-testid="{}"[^>]*>"#,
            regex::escape(id)
        ))
        .expect("valid element pattern");
        let name =
            Regex::new(&format!(r"\s{}(?:[\s=>]|/>)", regex::escape(attr))).expect("valid attr pattern");

        let mut tags = tag.find_iter(&self.html).peekable();
        tags.peek().is_some() && tags.all(|m| name.is_match(m.as_str()))
    }

    /// Text of the date cells, in display order.
    #[must_use]
    pub fn dates(&self) -> Vec<String> {
        Regex::new(r"<time[^>]*>([^<]*)</time>")
            .expect("valid date pattern")
            .captures_iter(&self.html)
            .filter_map(|c| c.get(1).map(|v| v.as_str().to_string()))
            .collect()
    }
}

/// Navigator that records every navigation and renders the last page.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Routes navigated to, in order.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("navigator lock").clone()
    }

    /// Screen of the page navigated to last.
    #[must_use]
    pub fn screen(&self) -> Option<Screen> {
        let route = self.routes().last().copied()?;
        Some(Screen::new(render_route(route).expect("route renders")))
    }
}

impl Navigate for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().expect("navigator lock").push(route);
    }
}

/// Modal that records what it shows.
#[derive(Debug)]
pub struct RecordingModal {
    width: u32,
    bodies: Mutex<Vec<String>>,
}

impl RecordingModal {
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self {
            width,
            bodies: Mutex::new(Vec::new()),
        }
    }

    /// Bodies shown, in order.
    #[must_use]
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().expect("modal lock").clone()
    }
}

impl ModalPresenter for RecordingModal {
    fn width(&self) -> u32 {
        self.width
    }

    fn show(&self, body: String) {
        self.bodies.lock().expect("modal lock").push(body);
    }
}

/// File input that records clears and the error indicator.
#[derive(Debug, Default)]
pub struct RecordingFileInput {
    cleared: AtomicBool,
    error: Mutex<Option<String>>,
}

impl RecordingFileInput {
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }

    /// Message of the error indicator, when shown.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.lock().expect("input lock").clone()
    }
}

impl FileInput for RecordingFileInput {
    fn clear(&self) {
        self.cleared.store(true, Ordering::SeqCst);
    }

    fn show_error(&self, message: &str) {
        *self.error.lock().expect("input lock") = Some(message.to_string());
    }

    fn hide_error(&self) {
        *self.error.lock().expect("input lock") = None;
    }
}

/// The web app served on an ephemeral local port.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Serve the app over `store` in a background task.
    pub async fn start(store: Arc<dyn BillStore>) -> Self {
        let app = routes::app(AppState::new(store), &WebConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self { addr }
    }

    /// Absolute URL of `path` on the server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// HTTP client that doesn't follow redirects.
    #[must_use]
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }
}
