//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint methods, status codes and paths
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Template syntax is checked by the pattern compiler, not here

use std::net::SocketAddr;

use axum::http::Method;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("endpoint {index}: invalid method `{method}`")]
    InvalidMethod { index: usize, method: String },

    #[error("endpoint {index}: status {status} is outside 100-999")]
    InvalidStatus { index: usize, status: u16 },

    #[error("endpoint {index}: path is empty")]
    EmptyPath { index: usize },

    #[error("endpoint {index}: path `{path}` must start with `/`")]
    RelativePath { index: usize, path: String },

    #[error("endpoint {index}: jsonPath is empty")]
    EmptyBodyPath { index: usize },

    #[error("port must be non-zero")]
    ZeroPort,

    #[error("timeouts.requestSecs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.method.is_empty() || Method::from_bytes(endpoint.method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: endpoint.method.clone(),
            });
        }

        if !(100..=999).contains(&endpoint.status) {
            errors.push(ValidationError::InvalidStatus {
                index,
                status: endpoint.status,
            });
        }

        if endpoint.path.is_empty() {
            errors.push(ValidationError::EmptyPath { index });
        } else if !endpoint.regex && !endpoint.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                index,
                path: endpoint.path.clone(),
            });
        }

        if endpoint.json_path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyBodyPath { index });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
