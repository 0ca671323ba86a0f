use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "stafftrack")]
#[command(about = "StaffTrack CLI for working with staffing records over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL
    #[arg(
        short,
        long,
        global = true,
        env = "STAFFTRACK_URL",
        default_value = "http://localhost:8080"
    )]
    pub server: String,

    /// How results are rendered
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the module catalogue
    Modules,
    /// List a module's records
    List(ListArgs),
    /// Create a record
    Create(CreateArgs),
    /// Update a record
    Update(UpdateArgs),
    /// Delete a record
    Delete(DeleteArgs),
    /// Show recent record activity
    Activity(ActivityArgs),
    /// Ping the server's health endpoint
    Status,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Module name (e.g. clients)
    pub module: String,
    /// Reload from the store instead of the server's list cache
    #[arg(long)]
    pub refresh: bool,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Module name (e.g. clients)
    pub module: String,
    /// Field values as field=value pairs (e.g. name=Acme status=Active)
    pub fields: Vec<String>,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Module name (e.g. clients)
    pub module: String,
    /// Record id
    pub id: String,
    /// Field values as field=value pairs; omitted fields keep their value
    pub fields: Vec<String>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Module name (e.g. clients)
    pub module: String,
    /// Record id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(clap::Args)]
pub struct ActivityArgs {
    /// Filter by action (record_create, record_update, record_delete)
    #[arg(long)]
    pub action: Option<String>,
    /// Filter by module name
    #[arg(long)]
    pub module: Option<String>,
    /// Case-insensitive match on action, module and record id
    #[arg(long)]
    pub search: Option<String>,
    /// Maximum number of entries
    #[arg(long)]
    pub limit: Option<usize>,
}
