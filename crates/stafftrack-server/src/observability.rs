//! Tracing setup with a level filter that can be swapped at runtime.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static FILTER_HANDLE: OnceLock<FilterHandle> = OnceLock::new();

/// Installs the fmt subscriber behind a reloadable filter. Starts at
/// `info` unless `RUST_LOG` says otherwise; the configured level is
/// applied later through [`apply_logging_level`], once config is loaded.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);
    let _ = FILTER_HANDLE.set(handle);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

/// Swaps the active level filter. A no-op when tracing was never
/// initialized, as in tests.
pub fn apply_logging_level(level: &str) {
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };
    let _ = handle.modify(|filter| *filter = EnvFilter::new(level));
}
