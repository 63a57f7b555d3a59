//! Shared helpers for environment access and logging setup

pub mod env;
pub mod logging;

pub use env::{env_opt, env_or_default, env_present};
pub use logging::{init_logging, init_logging_from_config};
