use anyhow::Result;
use serde_json::Value;

use crate::cli::{ActivityArgs, OutputFormat};
use crate::client::ApiClient;
use crate::output;

pub async fn activity(client: &ApiClient, args: &ActivityArgs, format: OutputFormat) -> Result<()> {
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(action) = &args.action {
        params.push(("action".to_string(), action.clone()));
    }
    if let Some(module) = &args.module {
        params.push(("module".to_string(), module.clone()));
    }
    if let Some(search) = &args.search {
        params.push(("search".to_string(), search.clone()));
    }
    if let Some(limit) = args.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    let entries = client.activity(&params).await?;
    let entries = entries.as_array().cloned().unwrap_or_default();
    match format {
        OutputFormat::Json => output::print_json(&Value::Array(entries)),
        OutputFormat::Table => output::print_activity(&entries),
    }
    Ok(())
}
