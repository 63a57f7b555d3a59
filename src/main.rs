//! turtledexd binary
//!
//! Resolves the startup configuration (defaults, config file, flags), runs
//! the startup gate, and reports the result. Exits non-zero on any failure.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use turtledexd::config::DaemonConfig;
use turtledexd::startup::{self, FileSecretStore, StartupError};
use turtledexd::utils::init_logging_from_config;

#[derive(Parser, Debug)]
#[command(name = "turtledexd", version, about = "TurtleDex daemon")]
struct Args {
    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Modules to run, one letter each: c(onsensus) e(xplorer) g(ateway)
    /// h(ost) m(iner) r(enter) t(ransaction pool) w(allet)
    #[arg(short = 'M', long)]
    modules: Option<String>,

    /// API listen address (host:port or bare port)
    #[arg(long)]
    api_addr: Option<String>,

    /// Peer RPC listen address
    #[arg(long)]
    rpc_addr: Option<String>,

    /// Host listen address
    #[arg(long)]
    host_addr: Option<String>,

    /// Require a password on API requests
    #[arg(long)]
    authenticate_api: Option<bool>,

    /// Allow binding the API to a non-loopback address
    #[arg(long)]
    disable_api_security: bool,

    /// Data directory (holds the API password file)
    #[arg(short = 'd', long)]
    turtledex_directory: Option<PathBuf>,

    /// Log filter (RUST_LOG takes precedence)
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    /// Defaults, then the config file, then flags.
    fn resolve_config(&self) -> anyhow::Result<DaemonConfig> {
        let mut config = match &self.config {
            Some(path) => DaemonConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => DaemonConfig::default(),
        };

        if let Some(modules) = &self.modules {
            config.modules = modules.clone();
        }
        if let Some(addr) = &self.api_addr {
            config.api_addr = addr.clone();
        }
        if let Some(addr) = &self.rpc_addr {
            config.rpc_addr = addr.clone();
        }
        if let Some(addr) = &self.host_addr {
            config.host_addr = addr.clone();
        }
        if let Some(authenticate) = self.authenticate_api {
            config.authenticate_api = authenticate;
        }
        if self.disable_api_security {
            config.allow_api_bind = true;
        }
        if let Some(dir) = &self.turtledex_directory {
            config.data_dir = dir.clone();
        }
        if let Some(filter) = &self.log_filter {
            config.logging.filter = Some(filter.clone());
        }
        Ok(config)
    }
}

/// Run the startup gate. Errors are left to `main` to report.
fn run(config: DaemonConfig) -> Result<(), StartupError> {
    let store = FileSecretStore::in_data_dir(&config.data_dir);
    let startup = startup::prepare(config, &store)?;

    for module in startup.modules().iter() {
        info!("Enabling module {}", module);
    }
    info!(
        api = %startup.api_addr,
        rpc = %startup.rpc_addr,
        host = %startup.host_addr,
        "Endpoints ready"
    );
    if startup.authenticate_api {
        info!("API password stored in {}", store.path().display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from this config, so it is not up yet
            eprintln!("turtledexd: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging_from_config(&config.logging);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Startup aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
