//! Integration tests for the employee bills list.
//!
//! Given I am connected as an employee, on the Bills page.

use std::sync::Arc;

use askama::Template;
use billed_integration_tests::{RecordingModal, RecordingNavigator, Screen, TestServer};
use billed_web::controllers::{BillsController, RowEnumerator};
use billed_web::navigation::Route;
use billed_web::store::{MockStore, StoreOp, fixture_bills};
use billed_web::views::{BillRow, BillsPage, BillsViewState};
use reqwest::StatusCode;

fn fixture_rows() -> Vec<BillRow> {
    fixture_bills().iter().map(BillRow::from).collect()
}

fn render(state: BillsViewState) -> Screen {
    Screen::new(BillsPage::new(state).render().expect("bills page renders"))
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_window_icon_is_highlighted() {
    let screen = render(BillsViewState::loaded(fixture_rows()));

    let classes = screen.attrs_by_test_id("icon-window", "class");
    assert_eq!(classes.len(), 1);
    assert!(classes.iter().all(|c| c.contains("active-icon")));
    assert!(
        screen
            .attrs_by_test_id("icon-mail", "class")
            .iter()
            .all(|c| !c.contains("active-icon"))
    );
}

#[test]
fn test_bills_are_ordered_from_latest_to_earliest() {
    let screen = render(BillsViewState::loaded(fixture_rows()));

    let dates = screen.dates();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));

    assert_eq!(dates.len(), 4);
    assert_eq!(dates, sorted);
}

#[test]
fn test_loading_page_is_rendered() {
    let screen = render(BillsViewState::loading());

    assert!(screen.has_text("Loading..."));
    assert!(!screen.has_test_id("tbody"));
}

#[test]
fn test_error_page_is_rendered() {
    let screen = render(BillsViewState::failed("some error message"));

    assert!(screen.has_text("Erreur"));
    assert!(screen.has_text("some error message"));
    assert!(!screen.has_text("Loading..."));
}

#[test]
fn test_error_page_ignores_data() {
    let state = BillsViewState {
        data: fixture_rows(),
        loading: false,
        error: Some("Erreur 500".to_string()),
    };
    let screen = render(state);

    assert!(screen.has_test_id("error-message"));
    assert_eq!(screen.count_by_test_id("icon-eye"), 0);
}

// ============================================================================
// Controller actions
// ============================================================================

#[test]
fn test_new_bill_click_renders_form() {
    let store = MockStore::new();
    let navigator = RecordingNavigator::default();
    let modal = RecordingModal::new(500);
    let controller = BillsController::new(&store, &navigator, &modal);

    controller.on_new_bill_click();

    assert_eq!(navigator.routes(), vec![Route::NewBill]);
    let screen = navigator.screen().expect("a page was navigated to");
    assert!(screen.has_test_id("form-new-bill"));
}

#[test]
fn test_eye_click_opens_proof_modal() {
    let store = MockStore::new();
    let navigator = RecordingNavigator::default();
    let modal = RecordingModal::new(500);
    let controller = BillsController::new(&store, &navigator, &modal);

    let rows = fixture_rows();
    let screen = render(BillsViewState::loaded(rows.clone()));
    assert!(screen.has_test_id("modaleFile"));

    let icons = rows.eye_icons();
    let first = icons.first().expect("at least one eye icon");
    controller
        .on_icon_eye_click(first)
        .expect("modal body renders");

    let bodies = modal.bodies();
    assert_eq!(bodies.len(), 1);
    let body = Screen::new(bodies.concat());
    assert!(body.has_text("bill-proof-container"));
    assert!(body.has_text("width=\"250\""));
    assert!(body.has_text(&first.bill_url));
    assert!(navigator.routes().is_empty());
}

#[test]
fn test_eye_icons_match_rendered_urls() {
    let rows = fixture_rows();
    let screen = render(BillsViewState::loaded(rows.clone()));

    let mut rendered = screen.attrs_by_test_id("icon-eye", "data-bill-url");
    let mut enumerated: Vec<String> = rows.eye_icons().into_iter().map(|i| i.bill_url).collect();
    rendered.sort();
    enumerated.sort();

    assert_eq!(rendered, enumerated);
}

// ============================================================================
// Store integration
// ============================================================================

#[tokio::test]
async fn test_fetches_bills_from_mock_store() {
    let store = MockStore::new();
    let navigator = RecordingNavigator::default();
    let modal = RecordingModal::new(500);
    let controller = BillsController::new(&store, &navigator, &modal);

    let rows = controller.fetch_bills().await.expect("bills listed");
    let screen = render(BillsViewState::loaded(rows));

    assert_eq!(store.calls(StoreOp::List).await, 1);
    assert_eq!(screen.count_by_test_id("icon-eye"), 4);
    assert_eq!(
        screen.dates(),
        vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
    );
}

#[tokio::test]
async fn test_store_errors_are_shown() {
    for message in ["Erreur 404", "Erreur 500"] {
        let store = MockStore::new();
        store.reject_next(StoreOp::List, message).await;
        let navigator = RecordingNavigator::default();
        let modal = RecordingModal::new(500);
        let controller = BillsController::new(&store, &navigator, &modal);

        let err = controller
            .fetch_bills()
            .await
            .expect_err("store rejection");
        let screen = render(BillsViewState::failed(err.message()));

        assert!(screen.has_text(message), "missing {message}");
    }
}

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn test_http_bills_page() {
    let server = TestServer::start(Arc::new(MockStore::new())).await;

    let resp = TestServer::client()
        .get(server.url("/employee/bills"))
        .send()
        .await
        .expect("request sent");

    assert_eq!(resp.status(), StatusCode::OK);
    let screen = Screen::new(resp.text().await.expect("body"));
    assert!(screen.has_test_id("btn-new-bill"));
    assert_eq!(screen.count_by_test_id("icon-eye"), 4);
}

#[tokio::test]
async fn test_http_bills_page_shows_store_error() {
    let store = Arc::new(MockStore::new());
    store.reject_next(StoreOp::List, "Erreur 404").await;
    let server = TestServer::start(store).await;

    let resp = TestServer::client()
        .get(server.url("/employee/bills"))
        .send()
        .await
        .expect("request sent");

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let screen = Screen::new(resp.text().await.expect("body"));
    assert!(screen.has_text("Erreur 404"));
}

#[tokio::test]
async fn test_http_proof_fragment() {
    let server = TestServer::start(Arc::new(MockStore::new())).await;
    let page = Screen::new(
        TestServer::client()
            .get(server.url("/employee/bills"))
            .send()
            .await
            .expect("request sent")
            .text()
            .await
            .expect("body"),
    );
    let proof_path = page
        .attrs_by_test_id("icon-eye", "hx-get")
        .into_iter()
        .next()
        .expect("an eye icon");

    let resp = TestServer::client()
        .get(server.url(&proof_path.replace("&amp;", "&")))
        .send()
        .await
        .expect("request sent");

    assert_eq!(resp.status(), StatusCode::OK);
    let fragment = Screen::new(resp.text().await.expect("body"));
    assert!(fragment.has_text("bill-proof-container"));
    assert!(fragment.has_text("test.storage.tld"));
}
