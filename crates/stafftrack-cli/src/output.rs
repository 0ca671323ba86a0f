use colored::Colorize;
use serde_json::Value;
use stafftrack_core::FieldValue;
use stafftrack_editor::{EMPTY_TABLE_TEXT, cell_text, header_text};
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Renders records the way the dashboard table does: one column per
/// schema column, headers derived from column names, plus a leading Id
/// column so rows can be addressed in update and delete commands.
pub fn print_records(columns: &[String], records: &[Value]) {
    if records.is_empty() {
        println!("{EMPTY_TABLE_TEXT}");
        return;
    }
    println!("{}", records_table(columns, records));
}

fn records_table(columns: &[String], records: &[Value]) -> String {
    let mut builder = Builder::default();
    let mut headers = vec!["Id".to_string()];
    headers.extend(columns.iter().map(|column| header_text(column)));
    builder.push_record(headers);

    for record in records {
        let mut row = vec![
            record
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string(),
        ];
        for column in columns {
            row.push(cell_text(
                record.get(column.as_str()).and_then(FieldValue::from_json),
            ));
        }
        builder.push_record(row);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Key-value view of a single record, used after create and update.
pub fn print_record(record: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Some(map) = record.as_object() {
        for (key, value) in map {
            builder.push_record([key.clone(), cell_text(FieldValue::from_json(value))]);
        }
    }
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_modules(modules: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Module", "Label", "Fields", "Delete"]);
    for schema in modules {
        let fields = schema
            .get("fields")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        let delete = if schema
            .get("supports_delete")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            "Yes"
        } else {
            "No"
        };
        builder.push_record([
            text(schema, "module").to_string(),
            text(schema, "label").to_string(),
            fields.to_string(),
            delete.to_string(),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_activity(entries: &[Value]) {
    if entries.is_empty() {
        println!("No activity found");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Time", "Action", "Module", "Record"]);
    for entry in entries {
        builder.push_record([
            text(entry, "recorded_at"),
            text(entry, "action"),
            text(entry, "module"),
            text(entry, "record_id"),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

fn text<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("-")
}
