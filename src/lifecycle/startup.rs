//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Read every endpoint's response body from disk
//! - Compile every endpoint into the route table
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Body files are read once; requests never touch the filesystem
//! - Relative `jsonPath` values resolve against the working directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use axum::http::{Method, StatusCode};
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, EndpointConfig, ServerConfig, ValidationError};
use crate::http::dispatch::StaticResponse;
use crate::routing::{CompileError, RouteTable};

/// Error type for anything that stops the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read response body {}: {source}", .path.display())]
    BodyFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("endpoint {method} {path}: {reason}")]
    InvalidEndpoint {
        method: String,
        path: String,
        reason: String,
    },

    #[error("invalid route {method} {path}: {source}")]
    Route {
        method: String,
        path: String,
        #[source]
        source: CompileError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Load the configuration file, applying an optional port override.
pub fn load(path: &Path, port: Option<u16>) -> Result<ServerConfig, StartupError> {
    let mut config = load_config(path)?;
    if let Some(port) = port {
        if port == 0 {
            return Err(ConfigError::Validation(vec![ValidationError::ZeroPort]).into());
        }
        config.port = port;
    }

    tracing::info!(
        path = %path.display(),
        bind_address = %config.bind_address(),
        endpoints = config.endpoints.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    Ok(config)
}

/// Build the route table, reading each endpoint's body file.
pub fn build_route_table(config: &ServerConfig) -> Result<RouteTable, StartupError> {
    let mut table = RouteTable::new();

    for endpoint in &config.endpoints {
        let response = load_response(endpoint)?;
        let method = Method::from_bytes(endpoint.method.as_bytes()).map_err(|e| {
            StartupError::InvalidEndpoint {
                method: endpoint.method.clone(),
                path: endpoint.path.clone(),
                reason: e.to_string(),
            }
        })?;

        if !endpoint.regex && looks_like_regex(&endpoint.path) {
            tracing::warn!(
                method = %endpoint.method,
                path = %endpoint.path,
                "Path contains a named capture group but `regex` is not set; it will be matched literally"
            );
        }

        let registered = if endpoint.regex {
            table.register_regex(method, &endpoint.path, response)
        } else {
            table.register(method, &endpoint.path, response)
        };
        registered.map_err(|source| StartupError::Route {
            method: endpoint.method.clone(),
            path: endpoint.path.clone(),
            source,
        })?;
    }

    tracing::info!(routes = table.len(), "Route table built");
    Ok(table)
}

/// Load the config and compile every route without binding.
///
/// Returns the number of routes that would be served.
pub fn check(path: &Path, port: Option<u16>) -> Result<usize, StartupError> {
    let config = load(path, port)?;
    let table = build_route_table(&config)?;
    tracing::info!(routes = table.len(), "Configuration OK");
    Ok(table.len())
}

fn looks_like_regex(path: &str) -> bool {
    path.contains("(?P<") || path.contains("(?<")
}

fn load_response(endpoint: &EndpointConfig) -> Result<StaticResponse, StartupError> {
    let status = StatusCode::from_u16(endpoint.status).map_err(|e| {
        StartupError::InvalidEndpoint {
            method: endpoint.method.clone(),
            path: endpoint.path.clone(),
            reason: e.to_string(),
        }
    })?;

    let body = fs::read(&endpoint.json_path).map_err(|source| StartupError::BodyFile {
        path: endpoint.json_path.clone(),
        source,
    })?;

    tracing::debug!(
        file = %endpoint.json_path.display(),
        bytes = body.len(),
        "Response body loaded"
    );
    Ok(StaticResponse::new(status, body))
}

/// Bind the TCP listener for the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listening for connections");
    }
    Ok(listener)
}
