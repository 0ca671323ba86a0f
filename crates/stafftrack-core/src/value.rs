//! Scalar field values as exposed to the generic renderers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scalar value read out of a record by field name.
///
/// Records hold only scalars; the table and form renderers never see
/// nested structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// Extracts a scalar from a JSON value. `null` and non-scalar values
    /// yield `None` (rendered as a placeholder by the table layer).
    #[must_use]
    pub fn from_json(value: &Value) -> Option<FieldValue> {
        match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            _ => None,
        }
    }

    /// Returns the string form used for form prefill and table cells.
    ///
    /// Integral numbers drop the fractional part, so `50000.0` renders
    /// as `"50000"`.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Returns `true` for the boolean variant.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(_))
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
