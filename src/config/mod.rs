//! Configuration management for turtledexd
//!
//! Holds the daemon configuration record, loads it from TOML or JSON, and
//! canonicalizes it before the startup gate runs.

pub mod address;
pub mod modules;
pub mod process;

pub use address::{normalize_net_addr, split_host, split_port, AddressClass};
pub use modules::{process_modules, InvalidModuleError, Module, ModuleSet};
pub use process::{process_config, process_config_with_modules};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::utils::env_or_default;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "TURTLEDEX_DATA_DIR";

/// API password, zeroized on drop
///
/// Empty until the password bootstrap step fills it in.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiPassword(String);

impl ApiPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiPassword(<unset>)")
        } else {
            f.write_str("ApiPassword(<redacted>)")
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "turtledexd=debug"). RUST_LOG takes precedence.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Daemon configuration record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// API listen endpoint
    #[serde(default = "default_api_addr")]
    pub api_addr: String,

    /// Peer-to-peer RPC listen endpoint
    #[serde(default = "default_rpc_addr")]
    pub rpc_addr: String,

    /// Host listen endpoint
    #[serde(default = "default_host_addr")]
    pub host_addr: String,

    /// Module codes to activate, in activation order
    #[serde(default = "default_modules")]
    pub modules: String,

    /// Require a password on API requests
    #[serde(default = "default_true")]
    pub authenticate_api: bool,

    /// Permit binding the API to a non-loopback address
    #[serde(default)]
    pub allow_api_bind: bool,

    /// Daemon data directory (holds the persisted API password)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Runtime-only; never written to config files
    #[serde(skip)]
    pub api_password: ApiPassword,
}

fn default_true() -> bool {
    true
}

fn default_api_addr() -> String {
    "localhost:9980".to_string()
}

fn default_rpc_addr() -> String {
    ":9981".to_string()
}

fn default_host_addr() -> String {
    ":9982".to_string()
}

fn default_modules() -> String {
    "gctwhr".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(env_or_default(DATA_DIR_ENV, "turtledex"))
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            api_addr: default_api_addr(),
            rpc_addr: default_rpc_addr(),
            host_addr: default_host_addr(),
            modules: default_modules(),
            authenticate_api: true,
            allow_api_bind: false,
            data_dir: default_data_dir(),
            logging: LoggingConfig::default(),
            api_password: ApiPassword::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DaemonConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_toml_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DaemonConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from a file, picking the format from the extension (`.json` or TOML)
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::default();
        assert_eq!(config.api_addr, "localhost:9980");
        assert_eq!(config.rpc_addr, ":9981");
        assert_eq!(config.host_addr, ":9982");
        assert_eq!(config.modules, "gctwhr");
        assert!(config.authenticate_api);
        assert!(!config.allow_api_bind);
        assert!(config.api_password.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DaemonConfig = toml::from_str(
            r#"
            api_addr = "127.0.0.1:7777"
            modules = "cg"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_addr, "127.0.0.1:7777");
        assert_eq!(config.modules, "cg");
        assert_eq!(config.rpc_addr, ":9981");
        assert!(config.authenticate_api);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_password_never_serialized() {
        let mut config = DaemonConfig::default();
        config.api_password = ApiPassword::new("hunter2");
        let toml = toml::to_string_pretty(&config).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!toml.contains("hunter2"));
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_password_debug_redacted() {
        let password = ApiPassword::new("hunter2");
        assert_eq!(format!("{:?}", password), "ApiPassword(<redacted>)");
        assert_eq!(format!("{:?}", ApiPassword::default()), "ApiPassword(<unset>)");
    }
}
