//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     (method, template, action)
//!     → pattern.rs (compile template to anchored regex)
//!     → router.rs (append to ordered RouteTable)
//!     → Freeze as immutable Router
//!
//! Incoming Request (method, path)
//!     → matcher.rs (first entry with equal method and full-path match)
//!     → params.rs (attach captured parameters to request)
//!     → http::dispatch (static body or handler)
//!     → Return: response, or 404 on NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration, not specificity)

pub mod matcher;
pub mod params;
pub mod pattern;
pub mod router;

pub use matcher::{match_route, MatchResult};
pub use params::{param, with_params, ParamError, Params, RequestParamsExt};
pub use pattern::{CompileError, CompiledPattern};
pub use router::{Action, RouteEntry, RouteTable, Router};
