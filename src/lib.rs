//! turtledexd - daemon startup gate
//!
//! Decides, before any listener is opened, which modules the daemon runs,
//! which endpoints they bind, and whether exposing the API is safe.
//!
//! ## Startup pipeline
//!
//! 1. [`config::process_config`]: canonicalize endpoints and module codes
//! 2. [`startup::load_api_password`]: ensure an API password exists when
//!    authentication is enabled
//! 3. [`startup::verify_api_security`]: reject unsafe bind/auth combinations
//!
//! [`startup::prepare`] runs all stages in order and stops at the first error.

pub mod config;
pub mod startup;
pub mod utils;

pub use config::{DaemonConfig, Module, ModuleSet};
pub use startup::{prepare, StartupConfig, StartupError};
