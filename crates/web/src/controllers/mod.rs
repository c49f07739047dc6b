//! Page controllers.
//!
//! Controllers bind user actions to store calls. They never query markup
//! directly: everything they need from the page comes through a capability
//! trait (navigation, modal presenter, row enumerator, form reader, file
//! input), so any rendering technology can drive them.

pub mod bills;
pub mod new_bill;

pub use bills::{BillsController, EyeIcon, ModalPresenter, RowEnumerator};
pub use new_bill::{
    FileInput, FormField, FormReader, NewBillController, NewBillDraft, NewBillError,
    is_accepted_file,
};
