use std::io;

use anyhow::Result;
use colored::Colorize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::client::ApiClient;
use crate::output::{self, print_success};

fn parse_field_values(pairs: &[String]) -> Result<Value> {
    let mut values = Map::new();
    for pair in pairs {
        let Some((field, value)) = pair.split_once('=') else {
            anyhow::bail!("Invalid assignment \"{pair}\". Expected format: field=value");
        };
        if field.is_empty() {
            anyhow::bail!("Invalid assignment \"{pair}\". Expected format: field=value");
        }
        values.insert(field.to_string(), Value::String(value.to_string()));
    }
    Ok(Value::Object(values))
}

async fn find_schema(client: &ApiClient, module: &str) -> Result<Option<Value>> {
    let modules = client.modules().await?;
    Ok(modules.as_array().and_then(|list| {
        list.iter()
            .find(|schema| schema.get("module").and_then(Value::as_str) == Some(module))
            .cloned()
    }))
}

fn schema_columns(schema: &Value) -> Vec<String> {
    schema
        .get("columns")
        .and_then(Value::as_array)
        .map(|columns| {
            columns
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub async fn list(
    client: &ApiClient,
    module: &str,
    refresh: bool,
    format: OutputFormat,
) -> Result<()> {
    let records = client.list_records(module, refresh).await?;
    let records = records.as_array().cloned().unwrap_or_default();

    if matches!(format, OutputFormat::Json) {
        output::print_json(&Value::Array(records));
        return Ok(());
    }

    let columns = find_schema(client, module)
        .await?
        .map(|schema| schema_columns(&schema))
        .unwrap_or_default();
    output::print_records(&columns, &records);
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    module: &str,
    pairs: &[String],
    format: OutputFormat,
) -> Result<()> {
    let values = parse_field_values(pairs)?;
    let created = client.create_record(module, &values).await?;
    if created.is_null() {
        anyhow::bail!("No module named \"{module}\"; nothing was stored");
    }

    let id = created.get("id").and_then(Value::as_str).unwrap_or("?");
    print_success(&format!("Created {}/{}", module.cyan(), id.cyan()));
    match format {
        OutputFormat::Json => output::print_json(&created),
        OutputFormat::Table => output::print_record(&created),
    }
    Ok(())
}

pub async fn update(
    client: &ApiClient,
    module: &str,
    id: &str,
    pairs: &[String],
    format: OutputFormat,
) -> Result<()> {
    let values = parse_field_values(pairs)?;
    let updated = client.update_record(module, id, &values).await?;
    if updated.is_null() {
        anyhow::bail!("No module named \"{module}\"; nothing was updated");
    }

    print_success(&format!("Updated {}/{}", module.cyan(), id.cyan()));
    match format {
        OutputFormat::Json => output::print_json(&updated),
        OutputFormat::Table => output::print_record(&updated),
    }
    Ok(())
}

pub async fn delete(client: &ApiClient, module: &str, id: &str, yes: bool) -> Result<()> {
    let Some(schema) = find_schema(client, module).await? else {
        anyhow::bail!("No module named \"{module}\"");
    };
    if !schema
        .get("supports_delete")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let label = schema.get("label").and_then(Value::as_str).unwrap_or(module);
        anyhow::bail!("{label} records cannot be deleted");
    }

    if !yes && !confirm()? {
        println!("Cancelled.");
        return Ok(());
    }

    client.delete_record(module, id).await?;
    print_success(&format!("Deleted {}/{}", module.cyan(), id.cyan()));
    Ok(())
}

fn confirm() -> Result<bool> {
    use std::io::Write;

    print!("Are you sure you want to delete this record? [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
