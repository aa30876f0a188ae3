//! Route parameters carried on the request.
//!
//! # Responsibilities
//! - Hold the name → value pairs captured by a successful match
//! - Attach them to the request as a typed extension
//! - Give handler code a typed accessor that reports missing names
//!
//! # Design Decisions
//! - Stored in `http::Extensions` keyed by type, never by string
//! - Absent and empty are different: a missing name is an error

use axum::http::Request;

/// Parameters extracted from the matched route, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Look up a captured value by parameter name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}

/// Error returned by the parameter accessor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The request never went through a successful route match.
    #[error("request carries no route parameters")]
    NoParams,

    /// The matched route does not declare this parameter.
    #[error("route parameter `{0}` not found")]
    NotFound(String),
}

/// Attach a parameter set to a request.
pub fn with_params<B>(mut request: Request<B>, params: Params) -> Request<B> {
    request.extensions_mut().insert(params);
    request
}

/// Read a single route parameter from a request.
pub fn param<'r, B>(request: &'r Request<B>, name: &str) -> Result<&'r str, ParamError> {
    request
        .extensions()
        .get::<Params>()
        .ok_or(ParamError::NoParams)?
        .get(name)
        .ok_or_else(|| ParamError::NotFound(name.to_string()))
}

/// Extension trait giving handlers typed access to route parameters.
pub trait RequestParamsExt {
    /// The full parameter set, if the request was matched.
    fn params(&self) -> Option<&Params>;

    /// A single parameter by name.
    fn param(&self, name: &str) -> Result<&str, ParamError>;
}

impl<B> RequestParamsExt for Request<B> {
    fn params(&self) -> Option<&Params> {
        self.extensions().get::<Params>()
    }

    fn param(&self, name: &str) -> Result<&str, ParamError> {
        param(self, name)
    }
}
