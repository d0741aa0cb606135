//! Employee Gateway
//!
//! HTTP facade over an upstream employee-data API.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                 EMPLOYEE GATEWAY                 │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│ employee │───▶│  upstream   │──┼──▶ Upstream
//!                      │  │ server  │    │ service  │    │   client    │  │    Employee
//!   Client Response    │  │         │◀───│          │◀───│ + retries   │◀─┼─── API
//!   ◀──────────────────┼──│response │    └──────────┘    └─────────────┘  │
//!                      │  └─────────┘                                     │
//!                      │  ┌────────────────────────────────────────────┐  │
//!                      │  │ config │ observability │ lifecycle         │  │
//!                      │  └────────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use employee_gateway::config::validation::validate_config;
use employee_gateway::config::{load_config, ConfigError, GatewayConfig};
use employee_gateway::employee::EmployeeService;
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use employee_gateway::observability::{logging, metrics};
use employee_gateway::upstream::UpstreamClient;

#[derive(Parser)]
#[command(name = "employee-gateway")]
#[command(about = "HTTP facade over the upstream employee API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the upstream collection URL.
    #[arg(long)]
    upstream_url: Option<String>,
}

fn resolve_config(args: &Args) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(url) = &args.upstream_url {
        config.upstream.base_url = url.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_tracing(&config.observability)?;

    tracing::info!("employee-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        max_retries = config.retries.max_retries,
        retry_delay_ms = config.retries.delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let client = UpstreamClient::from_config(&config)?;
    let server = HttpServer::new(&config.listener, EmployeeService::new(client));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
