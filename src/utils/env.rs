//! Environment variable helpers
//!
//! The daemon reads two variables directly: the data directory override and
//! the API password override. Both treat an empty value as unset.

/// Value of `key`, or `default` when unset or empty
///
/// # Example
/// ```rust
/// use turtledexd::utils::env_or_default;
///
/// let data_dir = env_or_default("TURTLEDEX_DATA_DIR", "turtledex");
/// ```
pub fn env_or_default(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Value of `key`, or `None` when unset, empty, or not valid UTF-8
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Whether `key` is set at all (any value, including empty)
///
/// Used for presence-style switches such as `NO_COLOR`.
pub fn env_present(key: &str) -> bool {
    std::env::var_os(key).is_some()
}
