//! Trilha Verde - green career guidance service
//!
//! Main entry point for the trilha-verde binary. The service exposes a REST
//! API that routes chat messages through specialized guidance agents backed
//! by a hosted language model (or canned responses in mock mode), stores
//! youth personas on flat JSON files, and aggregates interaction analytics.

mod agents;
mod api;
mod cli;
mod config;
mod error;
mod logging;
mod provider;
mod recommend;
mod store;
mod types;
mod version;

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::logging::LogGuards;

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    // For commands that don't need full logging, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        _ => {}
    }

    let Commands::Serve {
        config: config_path,
        host,
        port,
        mock,
    } = cli.command
    else {
        unreachable!();
    };

    // Load config (or use defaults)
    let mut config = match ServiceConfig::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Use formatted error for terminal
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    // CLI flags take precedence over file and environment
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if mock {
        config.provider.mock_mode = true;
    }

    // Initialize logging with config settings
    // The guards must be kept alive for the lifetime of the program
    let _log_guards: LogGuards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    // Log version info at startup
    let build = version::build_info();
    info!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting Trilha Verde"
    );

    run_server(config)
}

/// Run the HTTP server until a shutdown signal arrives
fn run_server(config: ServiceConfig) -> Result<()> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        mock_mode = config.effective_mock_mode(),
        model = %config.provider.model,
        data_dir = %config.storage.data_dir,
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(num_cpus::get().min(8))
        .thread_name("trilha-verde")
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(async_server_main(config))
}

async fn async_server_main(config: ServiceConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = api::AppState::new(config)?;

    if state.orchestrator.provider().is_mock() {
        warn!("Mock mode active, replies come from canned responses");
    }

    let app = api::build_router(state.clone());

    let listener = TcpListener::bind(&addr).await?;
    let local_addr: SocketAddr = listener.local_addr()?;
    info!(addr = %local_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    info!("Shutdown signal received");
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: cli::ConfigSubcommand) -> Result<()> {
    use cli::ConfigSubcommand;

    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = ServiceConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            config::init_config(path.as_deref(), force)?;
        }
        ConfigSubcommand::Validate { config } => {
            let path = config.as_deref();
            match ServiceConfig::load(path) {
                Ok(_) => {
                    println!("Configuration is valid.");
                }
                Err(e) => {
                    eprint!("{}", e.format_for_terminal());
                    std::process::exit(e.exit_code());
                }
            }
        }
    }

    Ok(())
}
