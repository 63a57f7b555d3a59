//! Config canonicalization

use tracing::debug;

use super::address::normalize_net_addr;
use super::modules::{InvalidModuleError, ModuleSet};
use super::DaemonConfig;

/// Canonicalize endpoints and module codes.
///
/// Pure: takes the record by value and hands back the normalized copy, or
/// the first module error.
pub fn process_config(config: DaemonConfig) -> Result<DaemonConfig, InvalidModuleError> {
    process_config_with_modules(config).map(|(config, _)| config)
}

/// Like [`process_config`], also returning the parsed module selection.
pub fn process_config_with_modules(
    mut config: DaemonConfig,
) -> Result<(DaemonConfig, ModuleSet), InvalidModuleError> {
    config.api_addr = normalize_net_addr(&config.api_addr);
    config.rpc_addr = normalize_net_addr(&config.rpc_addr);
    config.host_addr = normalize_net_addr(&config.host_addr);
    let modules = ModuleSet::parse(&config.modules)?;
    config.modules = modules.as_code_string();

    debug!(
        api_addr = %config.api_addr,
        rpc_addr = %config.rpc_addr,
        host_addr = %config.host_addr,
        modules = %config.modules,
        "Processed daemon config"
    );
    Ok((config, modules))
}
