use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::ApiClient;
use crate::output;

pub async fn modules(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let modules = client.modules().await?;
    let modules = modules.as_array().cloned().unwrap_or_default();
    match format {
        OutputFormat::Json => output::print_json(&Value::Array(modules)),
        OutputFormat::Table => output::print_modules(&modules),
    }
    Ok(())
}

pub async fn status(client: &ApiClient, server: &str) -> Result<()> {
    let (code, body) = client.health().await?;
    if code == 200 {
        println!("{} {} is {}", "✓".green(), server.cyan(), "healthy".green());
    } else {
        println!(
            "{} {} returned {} {}",
            "✗".red(),
            server.cyan(),
            code.to_string().red(),
            body
        );
    }
    Ok(())
}
