//! API password bootstrap
//!
//! The API password lives in a small secret store (by default the
//! `apipassword` file in the data directory). On first start with
//! authentication enabled a random password is generated and persisted;
//! later starts reuse it.

use rand::rngs::OsRng;
use rand::RngCore;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ApiPassword, DaemonConfig};
use crate::utils::env_opt;

/// Environment variable that supplies the API password directly
pub const API_PASSWORD_ENV: &str = "TURTLEDEX_API_PASSWORD";

/// File name of the persisted password inside the data directory
pub const API_PASSWORD_FILE: &str = "apipassword";

/// Random bytes per generated password (hex-encoded to twice as many chars)
const API_PASSWORD_BYTES: usize = 16;

/// Secret store failure
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("failed to read API password from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write API password to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

/// Opaque get/set storage for a single secret
pub trait SecretStore {
    /// Stored secret, or `None` when absent
    fn load(&self) -> Result<Option<String>, SecretStoreError>;

    /// Create or overwrite the stored secret
    fn store(&self, secret: &str) -> Result<(), SecretStoreError>;
}

/// File-backed secret store
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/apipassword`
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(API_PASSWORD_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self) -> Result<Option<String>, SecretStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let secret = content.trim();
                if secret.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(secret.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SecretStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn store(&self, secret: &str) -> Result<(), SecretStoreError> {
        let write_err = |source| SecretStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        std::fs::write(&self.path, format!("{}\n", secret)).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        Ok(())
    }
}

/// In-process secret store
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secret: Mutex<Option<String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Mutex::new(Some(secret.into())),
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn load(&self) -> Result<Option<String>, SecretStoreError> {
        self.secret
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| SecretStoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn store(&self, secret: &str) -> Result<(), SecretStoreError> {
        let mut guard = self
            .secret
            .lock()
            .map_err(|_| SecretStoreError::Unavailable("memory store lock poisoned".to_string()))?;
        *guard = Some(secret.to_string());
        Ok(())
    }
}

/// Fresh random API password: 16 bytes from the OS RNG, hex-encoded
pub fn generate_api_password() -> String {
    let mut bytes = [0u8; API_PASSWORD_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Ensure `api_password` is set when API authentication is enabled.
///
/// Reads `TURTLEDEX_API_PASSWORD` first; see [`load_api_password_with_env`].
pub fn load_api_password(
    config: DaemonConfig,
    store: &dyn SecretStore,
) -> Result<DaemonConfig, SecretStoreError> {
    load_api_password_with_env(config, store, env_opt(API_PASSWORD_ENV))
}

/// Ensure `api_password` is set when API authentication is enabled.
///
/// Precedence: a non-empty `env_password`, then the stored secret, then a
/// newly generated password which is persisted before being assigned. With
/// authentication disabled the config is returned untouched.
pub fn load_api_password_with_env(
    mut config: DaemonConfig,
    store: &dyn SecretStore,
    env_password: Option<String>,
) -> Result<DaemonConfig, SecretStoreError> {
    if !config.authenticate_api {
        return Ok(config);
    }

    if let Some(password) = env_password.filter(|p| !p.is_empty()) {
        debug!("Using API password from {}", API_PASSWORD_ENV);
        config.api_password = ApiPassword::new(password);
        return Ok(config);
    }

    let password = match store.load()? {
        Some(existing) => {
            debug!("Using persisted API password");
            existing
        }
        None => {
            let generated = generate_api_password();
            store.store(&generated)?;
            info!("Generated new API password");
            generated
        }
    };
    config.api_password = ApiPassword::new(password);
    Ok(config)
}
