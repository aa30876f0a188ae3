//! Request matching.
//!
//! # Responsibilities
//! - Scan the route table in registration order
//! - Skip entries whose method differs without touching the path
//! - Build the parameter set for the first full-path match
//!
//! # Design Decisions
//! - First match wins; there is no specificity ranking
//! - A method mismatch is a plain miss (no 405 distinction)
//! - Total: every lookup yields `Matched` or `NoMatch`

use axum::http::Method;

use crate::routing::params::Params;
use crate::routing::router::{RouteEntry, RouteTable};

/// Outcome of looking up a request in the route table.
#[derive(Debug)]
pub enum MatchResult<'t> {
    NoMatch,
    Matched { entry: &'t RouteEntry, params: Params },
}

impl MatchResult<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }
}

/// Find the first entry matching `method` and the complete `path`.
pub fn match_route<'t>(table: &'t RouteTable, method: &Method, path: &str) -> MatchResult<'t> {
    for entry in table.entries() {
        if entry.method() != method {
            continue;
        }

        let Some(slots) = entry.pattern().captures(path) else {
            continue;
        };

        let params: Params = entry
            .pattern()
            .names()
            .iter()
            .zip(slots)
            .filter_map(|(name, value)| value.map(|v| (name.as_str(), v)))
            .collect();

        return MatchResult::Matched { entry, params };
    }

    MatchResult::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::dispatch::StaticResponse;
    use axum::http::StatusCode;

    fn ok(body: &'static str) -> StaticResponse {
        StaticResponse::new(StatusCode::OK, body)
    }

    fn body_of(result: &MatchResult<'_>) -> Option<Vec<u8>> {
        match result {
            MatchResult::Matched { entry, .. } => entry
                .action()
                .as_static()
                .map(|s| s.body().to_vec()),
            MatchResult::NoMatch => None,
        }
    }

    #[test]
    fn test_params_extracted() {
        let mut table = RouteTable::new();
        table
            .register(Method::GET, "/orgs/:org/repos/:repo", ok("{}"))
            .unwrap();

        match match_route(&table, &Method::GET, "/orgs/acme/repos/widgets") {
            MatchResult::Matched { params, .. } => {
                assert_eq!(params.get("org"), Some("acme"));
                assert_eq!(params.get("repo"), Some("widgets"));
                assert_eq!(params.len(), 2);
            }
            MatchResult::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/:id", ok("B")).unwrap();
        table.register(Method::GET, "/users/new", ok("A")).unwrap();

        let result = match_route(&table, &Method::GET, "/users/new");
        assert_eq!(body_of(&result), Some(b"B".to_vec()));
        match result {
            MatchResult::Matched { params, .. } => assert_eq!(params.get("id"), Some("new")),
            MatchResult::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_duplicate_templates_resolved_by_order() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/ping", ok("first")).unwrap();
        table.register(Method::GET, "/ping", ok("second")).unwrap();
        assert_eq!(table.len(), 2);

        let result = match_route(&table, &Method::GET, "/ping");
        assert_eq!(body_of(&result), Some(b"first".to_vec()));
    }

    #[test]
    fn test_method_isolation() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/items/:id", ok("get")).unwrap();
        table.register(Method::POST, "/items/:id", ok("post")).unwrap();

        let get = match_route(&table, &Method::GET, "/items/1");
        let post = match_route(&table, &Method::POST, "/items/1");
        let put = match_route(&table, &Method::PUT, "/items/1");

        assert_eq!(body_of(&get), Some(b"get".to_vec()));
        assert_eq!(body_of(&post), Some(b"post".to_vec()));
        assert!(!put.is_match());
    }

    #[test]
    fn test_method_mismatch_falls_through_to_later_entry() {
        let mut table = RouteTable::new();
        table.register(Method::POST, "/users/:id", ok("post")).unwrap();
        table.register(Method::GET, "/users/:uid", ok("get")).unwrap();

        match match_route(&table, &Method::GET, "/users/9") {
            MatchResult::Matched { entry, params } => {
                assert_eq!(entry.method(), Method::GET);
                assert_eq!(params.get("uid"), Some("9"));
                assert_eq!(params.get("id"), None);
            }
            MatchResult::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_no_match() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/:id", ok("{}")).unwrap();

        assert!(!match_route(&table, &Method::GET, "/missing").is_match());
        assert!(!match_route(&table, &Method::GET, "/users/1/").is_match());
        assert!(!match_route(&table, &Method::GET, "/users").is_match());
        assert!(!match_route(&RouteTable::new(), &Method::GET, "/").is_match());
    }

    #[test]
    fn test_repeated_matching_is_stable() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/a/:x", ok("1")).unwrap();
        table.register(Method::GET, "/a/:y", ok("2")).unwrap();

        let first = match match_route(&table, &Method::GET, "/a/v") {
            MatchResult::Matched { entry, params } => (entry as *const RouteEntry, params),
            MatchResult::NoMatch => panic!("expected a match"),
        };
        for _ in 0..10 {
            match match_route(&table, &Method::GET, "/a/v") {
                MatchResult::Matched { entry, params } => {
                    assert_eq!(entry as *const RouteEntry, first.0);
                    assert_eq!(params, first.1);
                }
                MatchResult::NoMatch => panic!("expected a match"),
            }
        }
    }

    #[test]
    fn test_regex_optional_group_omitted_from_params() {
        let mut table = RouteTable::new();
        table
            .register_regex(Method::GET, r"/items(?:/(?P<id>\d+))?", ok("[]"))
            .unwrap();

        match match_route(&table, &Method::GET, "/items") {
            MatchResult::Matched { params, .. } => assert!(params.is_empty()),
            MatchResult::NoMatch => panic!("expected a match"),
        }
    }
}
