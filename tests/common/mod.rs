//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use tokio::task::JoinHandle;
use tower::ServiceExt;

use stub_server::config::ServerConfig;
use stub_server::lifecycle::startup;
use stub_server::{HttpServer, RouteTable, Router, Shutdown};

/// Write a fixture file and return its path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Wrap a route table in a fully layered server using default settings.
#[allow(dead_code)]
pub fn server_for(table: RouteTable) -> HttpServer {
    HttpServer::new(&ServerConfig::default(), Router::new(table))
}

/// Drive one request through the in-process Axum app.
#[allow(dead_code)]
pub async fn send(app: axum::Router, method: Method, path: &str) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

/// Bind an ephemeral port on localhost and serve until `Shutdown` fires.
#[allow(dead_code)]
pub async fn start_server(
    mut config: ServerConfig,
    table: RouteTable,
) -> (SocketAddr, Shutdown, JoinHandle<Result<(), std::io::Error>>) {
    config.host = "127.0.0.1".into();
    config.port = 0;

    let listener = startup::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, Router::new(table));
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown, handle)
}
