//! Form-input normalization.
//!
//! Submitted form values arrive as strings keyed by field name. Before a
//! payload reaches the store, each value is passed through the module's
//! field definitions: declared fields only, numeric coercion with
//! per-field fallbacks, and create-only fields dropped from updates.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stafftrack_core::{CoreError, FieldDefinition, FieldKind, Result};

use crate::schema::ModuleSchema;

/// Raw form state: field name to submitted string, in form order.
pub type FormValues = IndexMap<String, String>;

/// Builds a create payload from submitted form values.
///
/// Only declared fields are copied; stray keys in `values` never reach
/// the store. Numeric fields are coerced per [`coerce_number`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidField`] when a numeric field without a
/// configured fallback receives a blank or unparseable value.
pub fn normalize_create(schema: &ModuleSchema, values: &FormValues) -> Result<Value> {
    normalize(schema, values, false)
}

/// Builds an update payload from submitted form values.
///
/// Same rules as [`normalize_create`], except create-only fields are
/// silently dropped so an edit can never rebind them.
///
/// # Errors
///
/// Returns [`CoreError::InvalidField`] when a numeric field without a
/// configured fallback receives a blank or unparseable value.
pub fn normalize_update(schema: &ModuleSchema, values: &FormValues) -> Result<Value> {
    normalize(schema, values, true)
}

fn normalize(schema: &ModuleSchema, values: &FormValues, for_update: bool) -> Result<Value> {
    let mut payload = Map::new();
    for field in &schema.fields {
        if for_update && field.create_only {
            continue;
        }
        match field.kind {
            FieldKind::Text | FieldKind::Select => {
                // Absent keys stay absent: the store's merge semantics
                // keep whatever value the record already holds.
                if let Some(value) = values.get(&field.name) {
                    payload.insert(field.name.clone(), Value::String(value.clone()));
                }
            }
            FieldKind::Number => {
                let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
                payload.insert(field.name.clone(), coerce_number(field, raw)?);
            }
        }
    }
    Ok(Value::Object(payload))
}

/// Coerces one submitted numeric string.
///
/// A parseable value wins, including an explicit `0`. A blank or
/// unparseable value falls back to the field's configured default, and
/// is rejected when the field has none.
///
/// # Errors
///
/// Returns [`CoreError::InvalidField`] for blank or unparseable input on
/// a field without a fallback.
pub fn coerce_number(field: &FieldDefinition, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    let parsed = if trimmed.is_empty() {
        None
    } else {
        trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
    };
    let number = match (parsed, field.number_default) {
        (Some(n), _) => n,
        (None, Some(default)) => default,
        (None, None) => {
            return Err(CoreError::invalid_field(
                &field.name,
                format!("expected a number, got '{raw}'"),
            ));
        }
    };
    Ok(json_number(number))
}

// Whole values within the f64-exact integer range are stored as JSON
// integers so a stored 12000 round-trips as 12000, not 12000.0.
fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stafftrack_core::ModuleId;

    use crate::schema::module_schema;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_create_coerces_numbers_and_keeps_strings() {
        let schema = module_schema(ModuleId::Clients);
        let payload = normalize_create(
            schema,
            &values(&[
                ("name", "Acme Corp"),
                ("billing_type", "Monthly"),
                ("payment_terms", "Net 30"),
                ("status", "Active"),
                ("outstanding", "12000"),
            ]),
        )
        .unwrap();

        assert_eq!(
            payload,
            json!({
                "name": "Acme Corp",
                "billing_type": "Monthly",
                "payment_terms": "Net 30",
                "status": "Active",
                "outstanding": 12000
            })
        );
    }

    #[test]
    fn test_blank_number_takes_field_default() {
        let schema = module_schema(ModuleId::BdProspects);
        let payload = normalize_create(
            schema,
            &values(&[("prospect_name", "Globex"), ("probability", "")]),
        )
        .unwrap();
        assert_eq!(payload["probability"], json!(10));

        let payload = normalize_create(schema, &values(&[("prospect_name", "Globex")])).unwrap();
        assert_eq!(payload["probability"], json!(10));

        let schema = module_schema(ModuleId::Clients);
        let payload = normalize_create(schema, &values(&[("name", "Acme")])).unwrap();
        assert_eq!(payload["outstanding"], json!(0));
    }

    #[test]
    fn test_unparseable_number_takes_field_default() {
        let schema = module_schema(ModuleId::BdProspects);
        let payload = normalize_create(
            schema,
            &values(&[("prospect_name", "Globex"), ("probability", "maybe")]),
        )
        .unwrap();
        assert_eq!(payload["probability"], json!(10));
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        // "0" parses, so it is stored as 0 rather than hijacked by the
        // fallback.
        let schema = module_schema(ModuleId::BdProspects);
        let payload = normalize_create(
            schema,
            &values(&[("prospect_name", "Globex"), ("probability", "0")]),
        )
        .unwrap();
        assert_eq!(payload["probability"], json!(0));
    }

    #[test]
    fn test_number_without_default_rejects_blank() {
        let schema = module_schema(ModuleId::Invoices);
        let err = normalize_create(
            schema,
            &values(&[("invoice_no", "INV-001"), ("amount", "")]),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { ref field, .. } if field == "amount"));

        let err = normalize_create(
            schema,
            &values(&[("invoice_no", "INV-001"), ("amount", "12k")]),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_drops_create_only_fields() {
        let schema = module_schema(ModuleId::Jobs);
        let submitted = values(&[
            ("title", "Forklift Operator"),
            ("client_id", "c-999"),
            ("priority", "High"),
            ("status", "Open"),
        ]);

        let create = normalize_create(schema, &submitted).unwrap();
        assert_eq!(create["client_id"], json!("c-999"));

        let update = normalize_update(schema, &submitted).unwrap();
        assert!(update.get("client_id").is_none());
        assert_eq!(update["title"], json!("Forklift Operator"));
    }

    #[test]
    fn test_stray_keys_are_ignored() {
        let schema = module_schema(ModuleId::Employees);
        let payload = normalize_create(
            schema,
            &values(&[("name", "Dana"), ("role", "Recruiter"), ("is_admin", "true")]),
        )
        .unwrap();
        assert!(payload.get("is_admin").is_none());
    }

    #[test]
    fn test_absent_text_key_is_omitted() {
        let schema = module_schema(ModuleId::Employees);
        let payload = normalize_create(schema, &values(&[("name", "Dana")])).unwrap();
        assert!(payload.get("email").is_none());
        assert!(payload.get("department").is_none());
    }

    #[test]
    fn test_fractional_numbers_survive() {
        let field = FieldDefinition::number("probability", "Probability (%)");
        assert_eq!(coerce_number(&field, "62.5").unwrap(), json!(62.5));
        assert_eq!(coerce_number(&field, " 40 ").unwrap(), json!(40));
    }
}
