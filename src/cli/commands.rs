use crate::config::ServerConfig;
use crate::hot_reload::watch_mapping;
use crate::mapping::{self, Mapping, MappingStore, DEFAULT_MAPPING_FILE};
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpServer, RedirectService, ServerHandle};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for yamlink
#[derive(Parser, Debug)]
#[command(name = "yamlink")]
#[command(about = "YAML-mapped redirect service", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the redirect server
    Serve {
        /// Server configuration file (YAML)
        #[arg(short, long, env = "CONFIG_FILE")]
        config: PathBuf,
    },
    /// Resolve one path against a mapping file and print the target
    Lookup {
        /// Path to resolve, e.g. `example` or `/docs/mirrors/0`
        query: String,

        /// Mapping file (YAML)
        #[arg(short, long, env = "MAP_FILE")]
        map_file: PathBuf,
    },
    /// Write the load-test mapping entry, as each simulated user does on start
    WriteMapping {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
        path: PathBuf,
    },
}

/// Parse process arguments and execute the command.
///
/// # Errors
///
/// Returns an error if:
/// - The config or mapping file cannot be read or parsed
/// - A lookup does not resolve
/// - The server fails to bind
/// - The mapping watcher cannot be set up
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Lookup { query, map_file } => {
            let target = lookup(&map_file, &query)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(target.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Commands::WriteMapping { path } => {
            mapping::write_default_mapping(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "mapping file written");
            Ok(())
        }
    }
}

/// Resolve `query` in the mapping file at `map_file`.
pub fn lookup(map_file: &Path, query: &str) -> Result<String> {
    let mapping = Mapping::load(map_file)?;
    let target = mapping
        .resolve(query)
        .with_context(|| format!("lookup of {query:?} failed"))?;
    Ok(target.to_string())
}

/// Load config and mapping, start the server and block until shutdown.
pub fn serve(config_path: &Path) -> Result<()> {
    let config = ServerConfig::load(config_path)
        .with_context(|| format!("Failed while loading config file {}", config_path.display()))?;
    info!(config = %config_path.display(), "Config file loaded successfully");

    RuntimeConfig::from_env().apply();

    let store = Arc::new(MappingStore::open(&config.map_file)?);
    let _watcher = if config.watch {
        Some(watch_mapping(Arc::clone(&store)).context("Failed to watch mapping file")?)
    } else {
        None
    };

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting server");
    let handle = HttpServer(RedirectService::new(store))
        .start(addr.as_str())
        .with_context(|| format!("Failed while starting server on {addr}"))?;

    wait_for_shutdown(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("Failed to register signals")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, addr = %handle.addr(), "Shutting down");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
}
