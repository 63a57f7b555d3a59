//! Logging initialization for the daemon binary
//!
//! Filter precedence: `RUST_LOG`, then the config/CLI filter, then `info`.
//! Output goes to stderr; ANSI colors are disabled when `NO_COLOR` is set.
//!
//! # Usage
//! ```rust,no_run
//! use turtledexd::utils::init_logging;
//!
//! init_logging(None); // Uses RUST_LOG or defaults to "info"
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::env::{env_opt, env_present};
use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive string according to precedence.
fn select_filter(rust_log: Option<String>, configured: Option<&str>) -> String {
    rust_log
        .or_else(|| configured.filter(|f| !f.is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize the global subscriber.
///
/// Call once at startup; later calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    let directives = select_filter(env_opt("RUST_LOG"), filter);
    let env_filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .with_ansi(!env_present("NO_COLOR")),
        )
        .with(env_filter)
        .try_init();
}

/// Initialize logging from the `[logging]` config section
pub fn init_logging_from_config(config: &LoggingConfig) {
    init_logging(config.filter.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_takes_precedence() {
        assert_eq!(
            select_filter(Some("trace".to_string()), Some("debug")),
            "trace"
        );
    }

    #[test]
    fn test_configured_filter_used_without_rust_log() {
        assert_eq!(select_filter(None, Some("turtledexd=debug")), "turtledexd=debug");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(select_filter(None, None), "info");
        assert_eq!(select_filter(None, Some("")), "info");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(Some("warn"));
        init_logging(Some("warn"));
    }
}
