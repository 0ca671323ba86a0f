pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod server;

pub use config::{AppConfig, AuditConfig, LoggingConfig, ServerConfig, StorageConfig};
pub use error::ApiError;
pub use handlers::AppState;
pub use observability::{apply_logging_level, init_tracing};
pub use server::{ServerBuilder, StafftrackServer, build_app};
