//! Configuration-driven HTTP mock server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 STUB SERVER                  │
//!                      │                                              │
//!  api.json ──────────▶│  config ──▶ lifecycle::startup ──▶ routing   │
//!  body files ────────▶│  (parse,     (read bodies,        (RouteTable│
//!                      │   validate)   compile routes)      frozen)   │
//!                      │                                              │
//!  Client Request ────▶│  http::server ──▶ routing::Router ──┐        │
//!                      │  (request id,     (first match,     │        │
//!                      │   trace, timeout)  params)          ▼        │
//!  Client Response ◀───│◀──────────────── http::dispatch ◀───┘        │
//!                      │                  (static JSON / handler / 404)│
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stub_server::http::HttpServer;
use stub_server::lifecycle::{signals, startup, Shutdown, StartupError};
use stub_server::observability::logging::{self, LogFormat};
use stub_server::observability::metrics;
use stub_server::routing::Router;

#[derive(Parser)]
#[command(name = "stub-server")]
#[command(about = "Serve pre-recorded JSON responses from a declarative endpoint list", long_about = None)]
struct Cli {
    /// Path to the endpoint configuration (JSON, or TOML by extension).
    #[arg(short, long, default_value = "api.json")]
    config: PathBuf,

    /// Override the configured port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Validate the configuration and body files, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    tracing::info!("stub-server v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    if cli.check {
        startup::check(&cli.config, cli.port)?;
        return Ok(());
    }

    let config = startup::load(&cli.config, cli.port)?;
    let table = startup::build_route_table(&config)?;

    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let listener = startup::bind(&config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(&config, Router::new(table));
    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
