//! Bills served by the mock store.

use billed_core::{Bill, BillKey, BillStatus, Email, ExpenseType, FormNumber};
use chrono::NaiveDate;

const STORAGE_URL: &str = "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o";

struct Fixture {
    id: &'static str,
    name: &'static str,
    expense_type: ExpenseType,
    date: (i32, u32, u32),
    amount: i64,
    vat: &'static str,
    commentary: &'static str,
    file_name: &'static str,
    status: BillStatus,
    comment_admin: &'static str,
}

const FIXTURES: [Fixture; 4] = [
    Fixture {
        id: "47qAXb6fIm2zOKkLzMro",
        name: "encore",
        expense_type: ExpenseType::Hotel,
        date: (2004, 4, 4),
        amount: 400,
        vat: "80",
        commentary: "séminaire billed",
        file_name: "preview-facture-free-201801-pdf-1.jpg",
        status: BillStatus::Pending,
        comment_admin: "ok",
    },
    Fixture {
        id: "BeKy5Mo4jkmdfPGYpTxZ",
        name: "test1",
        expense_type: ExpenseType::Transports,
        date: (2001, 1, 1),
        amount: 100,
        vat: "",
        commentary: "plop",
        file_name: "1592770761.jpeg",
        status: BillStatus::Refused,
        comment_admin: "en fait non",
    },
    Fixture {
        id: "UIUZtnPQvnbFnB0ozvJh",
        name: "test3",
        expense_type: ExpenseType::OnlineServices,
        date: (2003, 3, 3),
        amount: 300,
        vat: "60",
        commentary: "",
        file_name: "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        status: BillStatus::Accepted,
        comment_admin: "bon bah d'accord",
    },
    Fixture {
        id: "qcCK3SzECmaZAGRrHjaC",
        name: "test2",
        expense_type: ExpenseType::Restaurants,
        date: (2002, 2, 2),
        amount: 200,
        vat: "40",
        commentary: "test2",
        file_name: "preview-facture-free-201801-pdf-1.jpg",
        status: BillStatus::Refused,
        comment_admin: "pas la bonne facture",
    },
];

/// The four bills the mock store lists, in storage order (not date order).
#[must_use]
pub fn fixture_bills() -> Vec<Bill> {
    let email = Email::parse("a@a").ok();

    FIXTURES
        .iter()
        .map(|f| {
            let (y, m, d) = f.date;
            Bill {
                id: BillKey::new(f.id),
                email: email.clone(),
                name: f.name.to_string(),
                expense_type: f.expense_type,
                amount: FormNumber::Integer(f.amount),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                vat: FormNumber::Text(f.vat.to_string()),
                pct: FormNumber::Integer(20),
                commentary: Some(f.commentary.to_string()),
                file_url: Some(format!("{STORAGE_URL}/{}?alt=media", f.file_name)),
                file_name: Some(f.file_name.to_string()),
                status: f.status,
                comment_admin: Some(f.comment_admin.to_string()),
            }
        })
        .collect()
}
