mod cli;
mod client;
mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use client::ApiClient;
use output::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let client = ApiClient::new(&cli.server);

    match &cli.command {
        Commands::Modules => commands::server::modules(&client, format).await,
        Commands::List(args) => {
            commands::crud::list(&client, &args.module, args.refresh, format).await
        }
        Commands::Create(args) => {
            commands::crud::create(&client, &args.module, &args.fields, format).await
        }
        Commands::Update(args) => {
            commands::crud::update(&client, &args.module, &args.id, &args.fields, format).await
        }
        Commands::Delete(args) => {
            commands::crud::delete(&client, &args.module, &args.id, args.yes).await
        }
        Commands::Activity(args) => commands::activity::activity(&client, args, format).await,
        Commands::Status => commands::server::status(&client, &cli.server).await,
    }
}
