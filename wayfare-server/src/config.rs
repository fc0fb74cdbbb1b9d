//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the catalog CSV file.
pub const CATALOG_VAR: &str = "WAYFARE_CATALOG";
/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "WAYFARE_ADDR";
/// Environment variable naming the static asset directory.
pub const STATIC_DIR_VAR: &str = "WAYFARE_STATIC_DIR";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {value:?} is not a socket address")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Configuration for the explorer server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// CSV file holding the trip catalog.
    pub catalog_path: PathBuf,

    /// Address to listen on.
    pub addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        catalog_path: impl Into<PathBuf>,
        addr: SocketAddr,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            addr,
            static_dir: static_dir.into(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables take their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(CATALOG_VAR) {
            config.catalog_path = path.into();
        }
        if let Some(addr) = lookup(ADDR_VAR) {
            config.addr = addr.trim().parse().map_err(|_| ConfigError {
                var: ADDR_VAR,
                value: addr.clone(),
            })?;
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR) {
            config.static_dir = dir.into();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("sample.csv"),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
        }
    }
}
