//! Field schema types driving the generic form and table renderers.

use serde::{Deserialize, Serialize};

/// The kind of input widget a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-text input.
    Text,
    /// Numeric input; submitted strings are coerced before storage.
    Number,
    /// Closed-choice input populated from [`FieldDefinition::options`].
    Select,
}

/// One selectable choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    /// Creates an option whose label equals its value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Schema description of one editable attribute of a module's record.
///
/// The `name` must match a key present on every record of the owning
/// module. Definitions are fixed per module and never depend on record
/// content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique key into the record.
    pub name: String,
    /// Display label.
    pub label: String,
    pub kind: FieldKind,
    /// Required fields must be non-empty before a form submit is accepted.
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields, in display order.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Fallback applied when a submitted numeric value is absent, blank,
    /// or unparseable. A `number` field without a default rejects
    /// unparseable input instead.
    #[serde(default)]
    pub number_default: Option<f64>,
    /// Accepted on create and silently dropped from update payloads.
    #[serde(default)]
    pub create_only: bool,
}

impl FieldDefinition {
    /// Creates a free-text field.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Creates a numeric field.
    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Creates a closed-choice field with options whose labels equal
    /// their values.
    #[must_use]
    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = options.into_iter().map(SelectOption::new).collect();
        field
    }

    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: Vec::new(),
            placeholder: None,
            number_default: None,
            create_only: false,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the input placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the numeric coercion fallback.
    #[must_use]
    pub fn with_number_default(mut self, default: f64) -> Self {
        self.number_default = Some(default);
        self
    }

    /// Marks the field as create-only.
    #[must_use]
    pub fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_builder() {
        let field = FieldDefinition::select("status", "Status", ["Active", "Hold", "Inactive"]);
        assert_eq!(field.kind, FieldKind::Select);
        assert_eq!(field.options.len(), 3);
        assert_eq!(field.options[1].label, "Hold");
        assert_eq!(field.options[1].value, "Hold");
        assert!(!field.required);
    }

    #[test]
    fn test_builder_flags() {
        let field = FieldDefinition::number("probability", "Probability (%)")
            .with_number_default(10.0);
        assert_eq!(field.number_default, Some(10.0));

        let field = FieldDefinition::text("client_id", "Client ID")
            .required()
            .create_only();
        assert!(field.required);
        assert!(field.create_only);
    }
}
