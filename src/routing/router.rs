//! Route table and request handling.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Look up the matching route for a request
//! - Hand matched requests to the dispatcher, everything else gets 404
//!
//! # Design Decisions
//! - Built once at startup, then frozen behind `Arc` (lock-free reads)
//! - Templates compile at registration so bad routes never reach traffic
//! - Overlapping and duplicate routes are legal; order decides

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;

use crate::http::dispatch::{self, Handler, StaticResponse};
use crate::http::request::RequestIdExt;
use crate::observability::metrics;
use crate::routing::matcher::{match_route, MatchResult};
use crate::routing::params::with_params;
use crate::routing::pattern::{CompileError, CompiledPattern};

/// What to do once a route has matched.
#[derive(Clone)]
pub enum Action {
    /// Reply with a fixed status and body.
    Static(StaticResponse),
    /// Call into handler code with the parameter-augmented request.
    Handler(Arc<dyn Handler>),
}

impl Action {
    pub fn handler<H: Handler>(handler: H) -> Self {
        Action::Handler(Arc::new(handler))
    }

    pub fn as_static(&self) -> Option<&StaticResponse> {
        match self {
            Action::Static(response) => Some(response),
            Action::Handler(_) => None,
        }
    }
}

impl From<StaticResponse> for Action {
    fn from(response: StaticResponse) -> Self {
        Action::Static(response)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Static(response) => f.debug_tuple("Static").field(response).finish(),
            Action::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// One registered (method, pattern, action) triple.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    method: Method,
    pattern: CompiledPattern,
    action: Action,
}

impl RouteEntry {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }
}

/// Ordered sequence of routes. Order is match priority.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route whose path uses `:name` / `{name}` placeholders.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        action: impl Into<Action>,
    ) -> Result<(), CompileError> {
        let pattern = CompiledPattern::compile(template)?;
        self.push(method, pattern, action.into());
        Ok(())
    }

    /// Append a route whose path is an explicit named-capture regex.
    pub fn register_regex(
        &mut self,
        method: Method,
        pattern: &str,
        action: impl Into<Action>,
    ) -> Result<(), CompileError> {
        let pattern = CompiledPattern::compile_regex(pattern)?;
        self.push(method, pattern, action.into());
        Ok(())
    }

    fn push(&mut self, method: Method, pattern: CompiledPattern, action: Action) {
        tracing::debug!(
            method = %method,
            template = pattern.template(),
            params = ?pattern.names(),
            "Route registered"
        );
        self.entries.push(RouteEntry {
            method,
            pattern,
            action,
        });
    }

    /// Look up a request. See [`match_route`].
    pub fn match_route(&self, method: &Method, path: &str) -> MatchResult<'_> {
        match_route(self, method, path)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable router shared by every request.
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
}

impl Router {
    /// Freeze a route table.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Match, attach parameters, dispatch; 404 when nothing matches.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().clone();
        let request_id = request.request_id().unwrap_or("unknown").to_string();

        let (response, route) = match self.table.match_route(&method, request.uri().path()) {
            MatchResult::Matched { entry, params } => {
                tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %request.uri().path(),
                    route = entry.template(),
                    params = ?params,
                    "Route matched"
                );
                let request = with_params(request, params);
                (dispatch::dispatch(entry.action(), request).await, entry.template())
            }
            MatchResult::NoMatch => {
                tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %request.uri().path(),
                    "No route matched"
                );
                (dispatch::not_found(), "none")
            }
        };

        metrics::record_request(method.as_str(), response.status().as_u16(), route, start);
        response
    }
}

impl From<RouteTable> for Router {
    fn from(table: RouteTable) -> Self {
        Router::new(table)
    }
}
