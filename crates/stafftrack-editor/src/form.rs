//! Form dialog sessions.
//!
//! A session models one open add/edit dialog: string-typed values keyed
//! by field name, a required-field gate, and a submit that goes through
//! the module binding. The session closes itself only after the binding
//! reports a saved record; failures and inert bindings leave it open
//! with the user's input intact.

use stafftrack_core::{AnyRecord, FieldDefinition, RecordFields};
use stafftrack_registry::{DynModuleBinding, FormValues, ModuleBinding};
use stafftrack_store::{StoreError, StoredRecord};

/// What a session is doing: creating a record or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit {
        /// Id of the record being edited, submitted alongside the values.
        id: String,
    },
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The record was stored and the dialog closed.
    Saved(StoredRecord),
    /// Required fields were empty; nothing was submitted.
    Blocked {
        /// Names of the empty required fields, in form order.
        missing: Vec<String>,
    },
    /// An inert binding accepted and dropped the submission. The dialog
    /// stays open since nothing was saved.
    Ignored,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The module does not support deletion; no prompt is shown.
    Unavailable,
}

/// The user's answer to the delete confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// One open add/edit dialog over a module binding.
pub struct EditorSession {
    binding: DynModuleBinding,
    mode: EditorMode,
    values: FormValues,
    open: bool,
}

impl EditorSession {
    /// Opens a blank add dialog. Untouched fields stay absent from the
    /// submitted values.
    #[must_use]
    pub fn add(binding: DynModuleBinding) -> Self {
        Self {
            binding,
            mode: EditorMode::Add,
            values: FormValues::new(),
            open: true,
        }
    }

    /// Opens an edit dialog prefilled from the record's current values.
    #[must_use]
    pub fn edit(binding: DynModuleBinding, record: &AnyRecord) -> Self {
        let values = prefill_values(binding.fields(), record);
        Self {
            binding,
            mode: EditorMode::Edit {
                id: record.id().to_string(),
            },
            values,
            open: true,
        }
    }

    /// Dialog title, e.g. "Add Clients" or "Edit BD Prospects".
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            EditorMode::Add => format!("Add {}", self.binding.label()),
            EditorMode::Edit { .. } => format!("Edit {}", self.binding.label()),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The fields this dialog renders, in form order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        self.binding.fields()
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Sets a field's value. Names outside the field set are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if self.binding.fields().iter().any(|f| f.name == name) {
            self.values.insert(name.to_string(), value.into());
        }
    }

    /// Names of required fields that are absent or empty, in form order.
    /// The check is literal: whitespace counts as filled.
    #[must_use]
    pub fn missing_required(&self) -> Vec<String> {
        self.binding
            .fields()
            .iter()
            .filter(|f| f.required && self.values.get(&f.name).is_none_or(String::is_empty))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Submits the dialog through the binding.
    ///
    /// Empty required fields block the submit before the binding is
    /// called. The dialog closes only on [`SubmitOutcome::Saved`]; a
    /// blocked, ignored, or failed submit keeps it open with the values
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates normalization and store errors from the binding.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, StoreError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Ok(SubmitOutcome::Blocked { missing });
        }

        let saved = match &self.mode {
            EditorMode::Add => self.binding.create(&self.values).await?,
            EditorMode::Edit { id } => {
                let mut values = self.values.clone();
                values.insert("id".to_string(), id.clone());
                self.binding.update(&values).await?
            }
        };

        match saved {
            Some(record) => {
                self.open = false;
                Ok(SubmitOutcome::Saved(record))
            }
            None => Ok(SubmitOutcome::Ignored),
        }
    }

    /// Closes the dialog without submitting.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}

/// Builds edit-dialog values from a record: the id plus every field
/// rendered through its display string, missing fields as empty strings.
#[must_use]
pub fn prefill_values(fields: &[FieldDefinition], record: &AnyRecord) -> FormValues {
    let mut values = FormValues::new();
    values.insert("id".to_string(), record.id().to_string());
    for field in fields {
        let text = record
            .field(&field.name)
            .map(|value| value.display_string())
            .unwrap_or_default();
        values.insert(field.name.clone(), text);
    }
    values
}

/// Runs the delete flow for one row: unsupported modules bail before any
/// prompt, a declined prompt does nothing, a confirmed one deletes.
///
/// # Errors
///
/// Propagates store errors from the delete itself.
pub async fn confirm_delete(
    binding: &dyn ModuleBinding,
    id: &str,
    confirmation: Confirmation,
) -> Result<DeleteOutcome, StoreError> {
    if !binding.supports_delete() {
        return Ok(DeleteOutcome::Unavailable);
    }
    if confirmation == Confirmation::Declined {
        return Ok(DeleteOutcome::Cancelled);
    }
    binding.delete(id).await?;
    Ok(DeleteOutcome::Deleted)
}
