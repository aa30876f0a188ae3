//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate request ID)
//!     → routing::Router (match + attach params)
//!     → dispatch.rs (static body, handler, or 404)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod request;
pub mod server;

pub use dispatch::{dispatch, not_found, Handler, StaticResponse};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
