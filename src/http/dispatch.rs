//! Turning a matched action into a response.
//!
//! # Responsibilities
//! - Write static responses (status, JSON headers, body bytes verbatim)
//! - Invoke handler callbacks with the parameter-augmented request
//! - Produce the not-found response for unmatched requests
//!
//! # Design Decisions
//! - Static bodies are `Bytes`; cloning per request is a refcount bump
//! - `Accept: application/json` is echoed on static responses for
//!   compatibility with existing clients of the mock

use std::future::Future;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::routing::router::Action;

/// Callback invoked for `Action::Handler` routes.
///
/// Implemented for any `Fn(Request<Body>) -> impl Future<Output = Response>`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        Box::pin(self(request))
    }
}

/// A pre-recorded response: status code plus raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResponse {
    status: StatusCode,
    body: Bytes,
}

impl StaticResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Build the HTTP response for this entry.
    pub fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

/// Run a matched action.
pub async fn dispatch(action: &Action, request: Request<Body>) -> Response {
    match action {
        Action::Static(response) => response.to_response(),
        Action::Handler(handler) => handler.call(request).await,
    }
}

/// Response for requests no route matched.
pub fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
