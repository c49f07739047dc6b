//! New bill form view.

use askama::Template;
use askama_web::WebTemplate;
use billed_core::{ExpenseType, FileKey};
use serde::Deserialize;

use super::ICON_MAIL;
use crate::controllers::new_bill::{FormField, FormReader, NewBillDraft};

/// Values of the new bill form, keyed by the field test hooks.
///
/// Used both to prefill the form and to read a submitted one. The hidden
/// `file-*` fields carry the upload draft between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewBillForm {
    #[serde(rename = "expense-type", default)]
    pub expense_type: String,
    #[serde(rename = "expense-name", default)]
    pub name: String,
    #[serde(rename = "datepicker", default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(rename = "file-url", default)]
    pub file_url: String,
    #[serde(rename = "file-name", default)]
    pub file_name: String,
    #[serde(rename = "file-key", default)]
    pub file_key: String,
}

impl NewBillForm {
    /// Set a field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "expense-type" => &mut self.expense_type,
            "expense-name" => &mut self.name,
            "datepicker" => &mut self.date,
            "amount" => &mut self.amount,
            "vat" => &mut self.vat,
            "pct" => &mut self.pct,
            "commentary" => &mut self.commentary,
            "file-url" => &mut self.file_url,
            "file-name" => &mut self.file_name,
            "file-key" => &mut self.file_key,
            _ => return,
        };
        *slot = value;
    }

    /// Upload draft carried by the hidden fields.
    #[must_use]
    pub fn draft(&self) -> NewBillDraft {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        NewBillDraft {
            file_url: non_empty(&self.file_url),
            file_name: non_empty(&self.file_name),
            key: non_empty(&self.file_key).map(FileKey::new),
        }
    }

    /// Replace the hidden fields with `draft`.
    #[must_use]
    pub fn with_draft(mut self, draft: &NewBillDraft) -> Self {
        self.file_url = draft.file_url.clone().unwrap_or_default();
        self.file_name = draft.file_name.clone().unwrap_or_default();
        self.file_key = draft
            .key
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        self
    }
}

impl FormReader for NewBillForm {
    fn value(&self, field: FormField) -> String {
        match field {
            FormField::ExpenseType => self.expense_type.clone(),
            FormField::ExpenseName => self.name.clone(),
            FormField::Date => self.date.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Vat => self.vat.clone(),
            FormField::Pct => self.pct.clone(),
            FormField::Commentary => self.commentary.clone(),
        }
    }
}

/// Select option for an expense category.
#[derive(Debug, Clone)]
pub struct ExpenseTypeOption {
    pub label: &'static str,
    pub selected: bool,
}

/// New bill page.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "new_bill/index.html")]
pub struct NewBillPage {
    form: NewBillForm,
    expense_types: Vec<ExpenseTypeOption>,
    file_error: Option<String>,
    active_icon: &'static str,
}

impl NewBillPage {
    /// Build the page from prefilled values and an optional file error.
    #[must_use]
    pub fn new(form: NewBillForm, file_error: Option<String>) -> Self {
        let selected = form.expense_type.parse::<ExpenseType>().ok();
        let expense_types = ExpenseType::ALL
            .into_iter()
            .map(|t| ExpenseTypeOption {
                label: t.label(),
                selected: selected == Some(t),
            })
            .collect();

        Self {
            form,
            expense_types,
            file_error,
            active_icon: ICON_MAIL,
        }
    }
}

impl Default for NewBillPage {
    fn default() -> Self {
        Self::new(NewBillForm::default(), None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_renders_all_hooks() {
        let html = NewBillPage::default().render().unwrap();

        for hook in [
            "form-new-bill",
            "expense-type",
            "expense-name",
            "datepicker",
            "amount",
            "vat",
            "pct",
            "commentary",
            "file",
        ] {
            assert!(
                html.contains(&format!("data-testid=\"{hook}\"")),
                "missing hook {hook}"
            );
        }
        assert!(html.contains("Envoyer une note de frais"));
        assert!(!html.contains("data-testid=\"errorMessage\""));
        assert_eq!(html.matches("<option ").count(), 7);
    }

    #[test]
    fn test_every_field_has_a_label() {
        let html = NewBillPage::default().render().unwrap();

        for id in [
            "expense-type",
            "expense-name",
            "datepicker",
            "amount",
            "vat",
            "pct",
            "commentary",
            "file",
        ] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing field {id}");
            assert!(html.contains(&format!("<label for=\"{id}\"")), "missing label for {id}");
        }
    }

    #[test]
    fn test_file_input_required_until_uploaded() {
        let html = NewBillPage::default().render().unwrap();
        assert!(html.contains("<input required type=\"file\""));
        assert!(!html.contains("data-testid=\"file-uploaded\""));

        let draft = NewBillDraft {
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("test.jpg".to_string()),
            key: Some(FileKey::new("1234")),
        };
        let html = NewBillPage::new(NewBillForm::default().with_draft(&draft), None)
            .render()
            .unwrap();
        assert!(html.contains("<input type=\"file\""));
        assert!(!html.contains("<input required type=\"file\""));
        assert!(html.contains("<p data-testid=\"file-uploaded\" class=\"file-uploaded\">test.jpg</p>"));
    }

    #[test]
    fn test_file_error_shows_indicator() {
        let html = NewBillPage::new(NewBillForm::default(), Some("jpg only".to_string()))
            .render()
            .unwrap();
        assert!(html.contains("data-testid=\"errorMessage\""));
        assert!(html.contains("jpg only"));
    }

    #[test]
    fn test_prefill_selects_type_and_keeps_values() {
        let form = NewBillForm {
            expense_type: "Hotel".to_string(),
            name: "Test-Bill".to_string(),
            date: "2022-03-01".to_string(),
            ..NewBillForm::default()
        };
        let html = NewBillPage::new(form, None).render().unwrap();

        assert!(html.contains("<option value=\"Hôtel et logement\" selected>"));
        assert!(html.contains("value=\"Test-Bill\""));
        assert!(html.contains("value=\"2022-03-01\""));
    }

    #[test]
    fn test_draft_roundtrips_through_hidden_fields() {
        let draft = NewBillDraft {
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("test.jpg".to_string()),
            key: Some(FileKey::new("1234")),
        };

        let form = NewBillForm::default().with_draft(&draft);
        assert_eq!(form.file_key, "1234");
        assert_eq!(form.draft(), draft);
        assert_eq!(NewBillForm::default().draft(), NewBillDraft::default());
    }

    #[test]
    fn test_set_by_form_name() {
        let mut form = NewBillForm::default();
        form.set("expense-name", "Vol Paris Londres".to_string());
        form.set("unknown", "ignored".to_string());
        assert_eq!(form.value(FormField::ExpenseName), "Vol Paris Londres");
    }
}
