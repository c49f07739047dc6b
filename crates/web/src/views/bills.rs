//! Bills list view.

use askama::Template;
use askama_web::WebTemplate;
use billed_core::{Bill, format_date};
use chrono::NaiveDate;

use super::ICON_WINDOW;
use crate::filters;

/// Path serving the proof modal body for a file URL.
const PROOF_PATH: &str = "/employee/bills/proof";

/// A bill as displayed in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRow {
    pub id: String,
    pub expense_type: String,
    pub name: String,
    /// Sort key, rendered as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// French short date, e.g. `4 Avr. 04`.
    pub formatted_date: String,
    pub amount: String,
    /// Status label, e.g. `En attente`.
    pub status: String,
    pub file_url: String,
    pub file_name: String,
    pub proof_path: String,
}

impl From<&Bill> for BillRow {
    fn from(bill: &Bill) -> Self {
        let file_url = bill.file_url.clone().unwrap_or_default();
        let encoded: String = url::form_urlencoded::byte_serialize(file_url.as_bytes()).collect();

        Self {
            id: bill.id.to_string(),
            expense_type: bill.expense_type.label().to_string(),
            name: bill.name.clone(),
            date: bill.date,
            formatted_date: format_date(bill.date),
            amount: bill.amount.to_string(),
            status: bill.status.label().to_string(),
            file_url,
            file_name: bill.file_name.clone().unwrap_or_default(),
            proof_path: format!("{PROOF_PATH}?url={encoded}"),
        }
    }
}

/// Input state of the bills list.
///
/// `error` wins over `loading`, which wins over `data`. An error flag
/// without a message is `Some(String::new())`.
#[derive(Debug, Clone, Default)]
pub struct BillsViewState {
    pub data: Vec<BillRow>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BillsViewState {
    /// State showing the given rows.
    #[must_use]
    pub const fn loaded(data: Vec<BillRow>) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    /// State showing the loading indicator.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// State showing the error panel with `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: Some(message.into()),
        }
    }
}

/// Bills list page.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "bills/index.html")]
pub struct BillsPage {
    rows: Vec<BillRow>,
    loading: bool,
    error: Option<String>,
    active_icon: &'static str,
}

impl BillsPage {
    /// Build the page, ordering rows from most recent to oldest.
    #[must_use]
    pub fn new(state: BillsViewState) -> Self {
        let BillsViewState {
            mut data,
            loading,
            error,
        } = state;
        data.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            rows: data,
            loading,
            error,
            active_icon: ICON_WINDOW,
        }
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[BillRow] {
        &self.rows
    }
}

/// Body of the proof modal: the attached image, centred.
#[derive(Debug, Template)]
#[template(path = "bills/_proof.html")]
pub struct ProofModal<'a> {
    pub url: &'a str,
    pub width: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::fixture_bills;

    fn fixture_rows() -> Vec<BillRow> {
        fixture_bills().iter().map(BillRow::from).collect()
    }

    #[test]
    fn test_row_formats_date_and_status() {
        let rows = fixture_rows();
        let row = rows.first().unwrap();

        assert_eq!(row.date.to_string(), "2004-04-04");
        assert_eq!(row.formatted_date, "4 Avr. 04");
        assert_eq!(row.status, "En attente");
        assert_eq!(row.expense_type, "Hôtel et logement");
        assert!(row.proof_path.starts_with("/employee/bills/proof?url=https%3A%2F%2F"));
    }

    #[test]
    fn test_page_sorts_most_recent_first() {
        let page = BillsPage::new(BillsViewState::loaded(fixture_rows()));
        let dates: Vec<String> = page.rows().iter().map(|r| r.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
        );
    }

    #[test]
    fn test_loading_state_renders_indicator() {
        let html = BillsPage::new(BillsViewState::loading()).render().unwrap();
        assert!(html.contains("Loading..."));
        assert!(!html.contains("data-testid=\"tbody\""));
    }

    #[test]
    fn test_error_wins_over_loading_and_data() {
        let state = BillsViewState {
            data: fixture_rows(),
            loading: true,
            error: Some("Erreur 500".to_string()),
        };
        let html = BillsPage::new(state).render().unwrap();

        assert!(html.contains("Erreur 500"));
        assert!(!html.contains("Loading..."));
        assert!(!html.contains("data-testid=\"icon-eye\""));
    }

    #[test]
    fn test_loaded_page_has_hooks_and_euros() {
        let html = BillsPage::new(BillsViewState::loaded(fixture_rows()))
            .render()
            .unwrap();

        assert!(html.contains("data-testid=\"icon-window\""));
        assert!(html.contains("data-testid=\"btn-new-bill\""));
        assert!(html.contains("data-testid=\"modaleFile\""));
        assert_eq!(html.matches("data-testid=\"icon-eye\"").count(), 4);
        assert!(html.contains("400 €"));
        assert!(html.contains("title=\"3 Mar. 03\""));
    }

    #[test]
    fn test_modal_close_empties_body() {
        let html = BillsPage::new(BillsViewState::loaded(fixture_rows()))
            .render()
            .unwrap();

        let close = html
            .split("data-testid=\"modal-close\"")
            .nth(1)
            .and_then(|rest| rest.split('>').next())
            .unwrap();
        assert!(close.contains(
            "hx-on:click=\"document.querySelector('#modaleFile .modal-body').replaceChildren()\""
        ));
        assert!(!html.contains("data-dismiss"));
        assert!(html.contains("<div class=\"modal-body\"></div>"));
    }

    #[test]
    fn test_proof_modal_uses_width_and_url() {
        let html = ProofModal {
            url: "https://test.storage.tld/bill.jpg",
            width: 250,
        }
        .render()
        .unwrap();

        assert!(html.contains("width=\"250\""));
        assert!(html.contains("src=\"https://test.storage.tld/bill.jpg\""));
        assert!(html.contains("bill-proof-container"));
    }
}
