//! DevOps CI/CD demo service entry point.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devops_demo::api::{self, create_router, AppState};
use devops_demo::config::{Config, LogFormat, DEFAULT_LOG_DIRECTIVES};
use devops_demo::metrics;
use devops_demo::ServiceError;

/// DevOps CI/CD demo HTTP service.
#[derive(Parser, Debug)]
#[command(name = "devops-demo")]
#[command(about = "Health, greeting and version endpoints for CI/CD pipeline demos")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the route table.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Serve { port, host }) => cmd_serve(port, host, args.verbose).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Routes) => cmd_routes(),
        None => cmd_serve(args.port, args.host, args.verbose).await,
    }
}

/// Initialize logging from configuration.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(config.log_directives())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

    let (json, text) = match config.log_format {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Text => (None, Some(fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Run the HTTP server until shutdown.
async fn cmd_serve(port: Option<u16>, host: Option<String>, verbose: bool) -> anyhow::Result<()> {
    let mut config = Config::load().map_err(ServiceError::from)?;

    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    config.verbose |= verbose;

    init_logging(&config);

    config.validate().map_err(ServiceError::InvalidConfig)?;
    let addr = config.socket_addr().map_err(ServiceError::InvalidConfig)?;

    info!("Configuration loaded successfully");
    info!("Version: {}", api::handlers::API_VERSION);
    info!("Metrics: {}", if config.metrics_enabled { "enabled" } else { "disabled" });

    let state = if config.metrics_enabled {
        AppState::with_metrics(metrics::install_recorder()?)
    } else {
        AppState::new()
    };

    let listener = api::bind(addr).await?;
    api::serve(listener, create_router(state)).await?;

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEVOPS DEMO - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.host, config.port);
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("  Verbose: {}", config.verbose);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the route table.
fn cmd_routes() -> anyhow::Result<()> {
    for (method, path) in api::routes::ROUTES {
        println!("{:<6} {}", method, path);
    }
    Ok(())
}
