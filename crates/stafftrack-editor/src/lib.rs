//! # stafftrack-editor
//!
//! The generic record editor: a schema-driven table projection and a
//! form dialog session, both working exclusively through the module
//! binding interface. Neither knows which module it is rendering.

pub mod form;
pub mod table;

pub use form::{
    Confirmation, DeleteOutcome, EditorMode, EditorSession, SubmitOutcome, confirm_delete,
    prefill_values,
};
pub use table::{EMPTY_TABLE_TEXT, RowAction, TableRow, TableView, cell_text, header_text};
