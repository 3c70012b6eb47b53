//! `search-health`: cluster health from the command line.
//!
//! ```text
//! search-health --config search.toml check [--json]
//! search-health --config search.toml watch --interval-secs 10
//! ```
//!
//! `check` exits 0 when the cluster is UP and 1 when it is DOWN.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use search_link::config::{load_config, ClientConfig, ConfigWatcher};
use search_link::lifecycle::Shutdown;
use search_link::observability::{logging, metrics};
use search_link::{HealthResult, SearchClient};

#[derive(Parser)]
#[command(name = "search-health")]
#[command(about = "Health checks against a search cluster", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "search.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single health check
    Check {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-check periodically, reloading the config file on change
    Watch {
        #[arg(short, long, default_value_t = 10)]
        interval_secs: u64,

        /// Print each result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = read_config(&cli.config)?;

    logging::init(&config.observability.log_level);
    tracing::info!(config = ?cli.config, hosts = ?config.hosts, "search-health starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let client = Arc::new(SearchClient::new(config)?);
    let indicator = client
        .health_indicator()
        .ok_or("health indicator is disabled in configuration")?;

    match cli.command {
        Commands::Check { json } => {
            let result = indicator.check().await;
            print_result(&result, json)?;
            Ok(if result.status().is_up() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Watch { interval_secs, json } => {
            let shutdown = Shutdown::new();
            shutdown.trigger_on_ctrl_c();
            let mut stop = shutdown.subscribe();

            let (watcher, mut updates) =
                ConfigWatcher::new(&cli.config, client.config().clone());
            let _watch_handle = if cli.config.exists() {
                Some(watcher.run()?)
            } else {
                None
            };

            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = indicator.check().await;
                        print_result(&result, json)?;
                    }
                    Some(new_config) = updates.recv() => {
                        match client.apply_config(&new_config) {
                            Ok(()) => tracing::info!(hosts = ?new_config.hosts, "Configuration reloaded"),
                            Err(e) => tracing::error!(error = %e, "Rejected reloaded configuration"),
                        }
                    }
                    _ = stop.recv() => break,
                }
            }

            tracing::info!("Shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the config file, or fall back to defaults when it does not exist.
fn read_config(path: &Path) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(load_config(path)?)
    } else {
        eprintln!("{} not found, using default configuration", path.display());
        Ok(ClientConfig::default())
    }
}

fn print_result(result: &HealthResult, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result.cause() {
        Some(cause) => println!("{}: {} ({})", result.name(), result.status(), cause),
        None => {
            let cluster = result
                .details()
                .get("cluster_name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let status = result
                .details()
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            println!("{}: {} (cluster {} is {})", result.name(), result.status(), cluster, status);
        }
    }
    Ok(())
}
