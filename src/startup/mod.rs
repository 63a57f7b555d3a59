//! Daemon startup gate
//!
//! Runs once before any listener is opened:
//! normalize config -> validate modules -> bootstrap API password -> verify
//! API security. The first failure aborts startup.

pub mod secret;
pub mod security;

pub use secret::{
    generate_api_password, load_api_password, load_api_password_with_env, FileSecretStore,
    MemorySecretStore, SecretStore, SecretStoreError, API_PASSWORD_ENV, API_PASSWORD_FILE,
};
pub use security::{evaluate, verify_api_security, InsecureConfigurationError, SecurityRule};

use std::ops::Deref;
use thiserror::Error;
use tracing::info;

use crate::config::{process_config_with_modules, DaemonConfig, InvalidModuleError, ModuleSet};

/// Fatal startup failure
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid module selection: {0}")]
    InvalidModule(#[from] InvalidModuleError),

    #[error("API password bootstrap failed: {0}")]
    SecretStore(#[from] SecretStoreError),

    #[error("refusing to start: {0}")]
    InsecureConfiguration(#[from] InsecureConfigurationError),
}

/// Validated, read-only daemon configuration
#[derive(Debug, Clone)]
pub struct StartupConfig {
    inner: DaemonConfig,
    module_set: ModuleSet,
}

impl StartupConfig {
    /// Modules to activate, in order
    pub fn modules(&self) -> &ModuleSet {
        &self.module_set
    }
}

impl Deref for StartupConfig {
    type Target = DaemonConfig;

    fn deref(&self) -> &DaemonConfig {
        &self.inner
    }
}

/// Run the startup gate over `config`.
///
/// Errors are returned, not logged; the caller reports them once.
pub fn prepare(
    config: DaemonConfig,
    store: &dyn SecretStore,
) -> Result<StartupConfig, StartupError> {
    let (config, modules) = process_config_with_modules(config)?;
    let config = load_api_password(config, store)?;
    verify_api_security(&config)?;

    info!(
        api_addr = %config.api_addr,
        modules = %modules,
        authenticate_api = config.authenticate_api,
        "Startup configuration accepted"
    );
    Ok(StartupConfig {
        inner: config,
        module_set: modules,
    })
}
