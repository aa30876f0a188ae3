//! Configuration-driven HTTP mock server library.
//!
//! Endpoints are declared as (method, path template, status, body file).
//! Templates compile once into an ordered route table; each request is
//! matched first-match-wins and answered with the recorded body.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Action, RouteTable, Router};
