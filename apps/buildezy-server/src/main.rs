use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use axum::Router;
use clap::{Parser, Subcommand};
use db::DbHandle;
use enquiries::EnquiriesModule;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use tokio_util::sync::CancellationToken;
use vendors::VendorsModule;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Buildezy Server - vendor directory and enquiry inbox API
#[derive(Parser)]
#[command(name = "buildezy-server")]
#[command(about = "Buildezy Server - vendor directory and enquiry inbox API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of PostgreSQL
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // home_dir is normalized inside
    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Buildezy Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db = Arc::new(
        DbHandle::connect_lazy(&config.database).context("invalid database configuration")?,
    );
    tracing::info!(engine = ?db.engine(), target = %db.dsn(), "Database pool created");

    // Startup ping is informational only; the server comes up either way.
    let ping_db = db.clone();
    tokio::spawn(async move {
        match ping_db.ping().await {
            Ok(()) => tracing::info!("Database connection verified"),
            Err(e) => tracing::error!(error = %e, "Database connection failed"),
        }
    });

    let vendors = VendorsModule::new(db.clone());
    let enquiries = EnquiriesModule::new(db.clone());

    // Bounded by the pool's acquire timeout when the database is down.
    if config.database.bootstrap_schema {
        tracing::info!("Bootstrapping database schema");
        if let Err(e) = bootstrap_schema(&vendors, &enquiries).await {
            tracing::error!(error = %format!("{e:#}"), "Schema bootstrap failed; serving anyway");
        }
    }

    let routes = enquiries.register_rest(vendors.register_rest(Router::new()));
    let ingress = ApiIngress::new(ApiIngressConfig::from(&config));
    let router = ingress.build_router(routes);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!(error = %e, "Cannot listen for shutdown signals");
                return;
            }
            cancel.cancel();
        }
    });

    let served = ingress.serve(router, cancel).await;
    db.close().await;
    tracing::info!("Buildezy Server stopped");
    served
}

async fn bootstrap_schema(vendors: &VendorsModule, enquiries: &EnquiriesModule) -> Result<()> {
    vendors.migrate().await.context("vendors schema")?;
    enquiries.migrate().await.context("enquiries schema")?;
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    DbHandle::connect_lazy(&config.database).context("invalid database configuration")?;
    ApiIngressConfig::from(&config)
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("invalid server address {}", config.bind_addr()))?;

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
