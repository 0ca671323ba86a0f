//! Table projection of a module's records.
//!
//! The table is driven entirely by the module's column list: headers
//! are derived from column names, cells from name-indexed field access.
//! No module gets bespoke rendering.

use stafftrack_core::{AnyRecord, FieldValue, RecordFields};
use stafftrack_registry::ModuleBinding;

/// Shown in place of rows when a module has no records.
pub const EMPTY_TABLE_TEXT: &str = "No records found";

/// Per-row controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Record id, carried for wiring actions back to the record.
    pub id: String,
    /// Cell text, aligned with the view's headers.
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

/// A fully-rendered table for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Column headers plus a trailing "Actions" header.
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Projects records through the binding's column list.
    #[must_use]
    pub fn build(binding: &dyn ModuleBinding, records: &[AnyRecord]) -> Self {
        let mut headers: Vec<String> = binding.columns().iter().map(|c| header_text(c)).collect();
        headers.push("Actions".to_string());

        let mut actions = vec![RowAction::Edit];
        if binding.supports_delete() {
            actions.push(RowAction::Delete);
        }

        let rows = records
            .iter()
            .map(|record| TableRow {
                id: record.id().to_string(),
                cells: binding
                    .columns()
                    .iter()
                    .map(|column| cell_text(record.field(column)))
                    .collect(),
                actions: actions.clone(),
            })
            .collect();

        Self { headers, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derives a header from a column name: underscores become spaces and
/// each word is capitalized, so `billing_type` renders as "Billing Type".
#[must_use]
pub fn header_text(column: &str) -> String {
    column
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one cell. Booleans become "Yes"/"No", an unresolvable column
/// becomes "-", everything else uses the value's display string.
#[must_use]
pub fn cell_text(value: Option<FieldValue>) -> String {
    match value {
        Some(FieldValue::Bool(true)) => "Yes".to_string(),
        Some(FieldValue::Bool(false)) => "No".to_string(),
        Some(value) => value.display_string(),
        None => "-".to_string(),
    }
}
