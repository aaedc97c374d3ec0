//! Main entry point for the Podium ranking service
//!
//! This is the production entry point that initializes and runs the ranking
//! engine and its HTTP API with proper error handling, logging, and graceful
//! shutdown.

use anyhow::Result;
use clap::Parser;
use podium::api::{ApiServer, ApiServerConfig};
use podium::config::AppConfig;
use podium::engine::RankingEngine;
use podium::metrics::MetricsCollector;
use podium::store::{apply_seed, load_seed_file};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Podium Ranking Service - Head-to-Head Company Voting and Leaderboards
#[derive(Parser)]
#[command(
    name = "podium",
    version,
    about = "A head-to-head company ranking service with ELO ratings and leaderboards",
    long_about = "Podium is a Rust-based ranking service that serves company matchups, \
                 applies ELO rating exchanges on votes, aggregates per-criterion ratings, \
                 and exposes stable paginated leaderboards over an HTTP API."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Seed file override
    #[arg(
        long,
        value_name = "FILE",
        help = "Override path to the JSON company seed catalog"
    )]
    seed: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("🏆 Podium Ranking Service");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   HTTP: {}:{}",
        config.service.http_host, config.service.http_port
    );
    info!("   K-factor: {}", config.engine.k_factor);
    info!("   Initial rating: {}", config.engine.initial_rating);
    match &config.store.seed_path {
        Some(path) => info!("   Seed catalog: {}", path.display()),
        None => info!("   Seed catalog: none (empty store)"),
    }
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    // Start with environment-based config
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    if let Some(seed) = &args.seed {
        config.store.seed_path = Some(seed.clone());
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    // Display startup information
    display_startup_banner(&config);

    // Initialize service components
    info!("Initializing service components...");
    let metrics = Arc::new(MetricsCollector::new()?);
    let engine = Arc::new(
        RankingEngine::in_memory(config.engine.clone())?.with_metrics(metrics.clone()),
    );

    // Load the seed catalog, if configured
    if let Some(seed_path) = &config.store.seed_path {
        info!("Loading seed catalog from {}", seed_path.display());
        let companies = load_seed_file(seed_path)?;
        let inserted = apply_seed(engine.company_store().as_ref(), companies)?;
        info!("Seeded {} companies", inserted);
    }

    // Start the HTTP API
    let server = Arc::new(ApiServer::new(
        ApiServerConfig {
            host: config.service.http_host.clone(),
            port: config.service.http_port,
        },
        engine,
        metrics,
    ));

    let server_task = {
        let server = server.clone();
        tokio::spawn(async move {
            if let Err(e) = server.start().await {
                error!("API server error: {}", e);
            }
        })
    };

    info!("✅ Podium Ranking Service is running");
    info!("Press Ctrl+C to shutdown gracefully...");

    // Wait for shutdown signal
    wait_for_shutdown_signal().await;

    // Begin graceful shutdown
    info!("🛑 Shutdown signal received, beginning graceful shutdown...");
    server.stop()?;

    match tokio::time::timeout(config.shutdown_timeout(), server_task).await {
        Ok(_) => {
            info!("✅ Graceful shutdown completed successfully");
        }
        Err(_) => {
            warn!("⚠️  Shutdown timeout exceeded, forcing exit");
        }
    }

    info!("🛑 Podium Ranking Service stopped");
    Ok(())
}
