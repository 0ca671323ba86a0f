//! Server configuration: TOML file plus environment overrides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Checks every section, reporting the first offending key.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.storage.validate()?;
        self.audit.validate()?;
        self.logging.validate()
    }

    /// Bind address. An unparseable host falls back to all interfaces.
    pub fn addr(&self) -> SocketAddr {
        let host = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(host, self.server.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.server.read_timeout_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    #[serde(default = "defaults::read_timeout_ms")]
    pub read_timeout_ms: u32,
    #[serde(default = "defaults::body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("server.port", u64::from(self.port)),
            ("server.read_timeout_ms", u64::from(self.read_timeout_ms)),
            ("server.body_limit_bytes", self.body_limit_bytes as u64),
        ] {
            if value == 0 {
                return Err(format!("{key} must not be 0"));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            read_timeout_ms: defaults::read_timeout_ms(),
            body_limit_bytes: defaults::body_limit_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Record store backend. Only "memory" is currently implemented.
    #[serde(default = "defaults::backend")]
    pub backend: String,
    /// Load demo records into an empty store at startup.
    #[serde(default = "defaults::seed")]
    pub seed: bool,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == "memory" {
            Ok(())
        } else {
            Err(format!(
                "storage.backend '{}' is not one of: memory",
                self.backend
            ))
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: defaults::backend(),
            seed: defaults::seed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "defaults::audit_enabled")]
    pub enabled: bool,
    /// Entries retained before the oldest is evicted.
    #[serde(default = "defaults::audit_capacity")]
    pub capacity: usize,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.capacity == 0 {
            return Err("audit.capacity must not be 0 while audit is enabled".into());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::audit_enabled(),
            capacity: defaults::audit_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let known = ["trace", "debug", "info", "warn", "error", "off"];
        if known.contains(&self.level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(format!("logging.level '{}' is not a tracing level", self.level))
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn host() -> String {
        "0.0.0.0".to_string()
    }
    pub fn port() -> u16 {
        8080
    }
    pub fn read_timeout_ms() -> u32 {
        15_000
    }
    pub fn body_limit_bytes() -> usize {
        1024 * 1024
    }
    pub fn backend() -> String {
        "memory".to_string()
    }
    pub fn seed() -> bool {
        true
    }
    pub fn audit_enabled() -> bool {
        true
    }
    pub fn audit_capacity() -> usize {
        200
    }
    pub fn log_level() -> String {
        "info".to_string()
    }
}

pub mod loader {
    use std::path::Path;

    use config::{Config, Environment, File};

    use super::AppConfig;

    /// Reads `path` (default `stafftrack.toml`) when the file exists,
    /// then applies `STAFFTRACK__`-prefixed environment overrides such
    /// as `STAFFTRACK__SERVER__PORT=9090`.
    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let file = Path::new(path.unwrap_or("stafftrack.toml"));
        let mut builder = Config::builder();
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        let cfg: AppConfig = builder
            .add_source(
                Environment::with_prefix("STAFFTRACK")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()
            .and_then(|merged| merged.try_deserialize())
            .map_err(|err| format!("configuration error: {err}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
