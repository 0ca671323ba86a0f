use std::{env, sync::Arc};

use stafftrack_db_memory::{create_memory_store, seed_demo_data};
use stafftrack_registry::{AuditTrail, Registry, TracingSink};
use stafftrack_server::ServerBuilder;
use stafftrack_server::config::loader::load_config;
use stafftrack_server::observability::{apply_logging_level, init_tracing};
use stafftrack_store::RecordStore;

#[tokio::main]
async fn main() {
    // A missing .env is normal; only a malformed one is worth a warning.
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("warning: could not load .env: {err}");
    }

    init_tracing();

    if let Err(err) = run().await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config_path = config_path();
    let cfg = load_config(config_path.as_deref()).map_err(|message| anyhow::anyhow!(message))?;
    // An explicit RUST_LOG outranks the configured level.
    if !env::var("RUST_LOG").is_ok_and(|directives| !directives.is_empty()) {
        apply_logging_level(&cfg.logging.level);
    }
    tracing::info!(
        path = config_path.as_deref().unwrap_or("stafftrack.toml"),
        "configuration loaded"
    );

    let store = create_memory_store();
    if cfg.storage.seed {
        seed_demo_data(store.as_ref()).await?;
        tracing::info!("demo records seeded");
    }
    tracing::info!(backend = store.backend_name(), "record store ready");

    let audit = if cfg.audit.enabled {
        Arc::new(AuditTrail::new(cfg.audit.capacity))
    } else {
        Arc::new(AuditTrail::disabled())
    };
    let registry = Arc::new(Registry::new(store, Arc::new(TracingSink), audit));

    ServerBuilder::new()
        .with_config(cfg)
        .with_registry(registry)
        .build()
        .run()
        .await
}

/// Config file path from `--config`, falling back to the
/// `STAFFTRACK_CONFIG` variable. `None` leaves the loader on its
/// default `stafftrack.toml` lookup.
fn config_path() -> Option<String> {
    let mut args = env::args().skip(1);
    if args.any(|arg| arg == "--config") {
        return args.next();
    }
    env::var("STAFFTRACK_CONFIG")
        .ok()
        .filter(|path| !path.is_empty())
}
