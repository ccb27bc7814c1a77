//! Request argument binding and dispatch.
//!
//! # Responsibilities
//! - Collect raw values from path variables and the query string
//! - Fulfill a match until no bindable argument remains
//! - Bind null to nullable leftovers, reject anything else unbound
//! - Execute and record the outcome
//!
//! # Design Decisions
//! - Decorated matches are executed as-is (their executor owns binding)
//! - Query parsing uses `url::form_urlencoded` (repeated keys: first wins)

use axum::http::Request;
use serde_json::Value;
use url::form_urlencoded;

use crate::config::RoutingConfig;
use crate::observability::metrics;
use crate::routing::error::RouteResult;
use crate::routing::matcher::{RouteMatch, Variables};

/// Binds request values into route matches and executes them.
#[derive(Debug, Clone, Default)]
pub struct RouteDispatcher {
    config: RoutingConfig,
}

impl RouteDispatcher {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Raw values available to `route_match` from `request`.
    pub fn candidate_values<T, B>(&self, route_match: &RouteMatch<T>, request: &Request<B>) -> Variables {
        let mut candidates = Variables::new();
        if self.config.bind_query_parameters {
            if let Some(query) = request.uri().query() {
                for (name, value) in form_urlencoded::parse(query.as_bytes()) {
                    candidates
                        .entry(name.into_owned())
                        .or_insert_with(|| Value::String(value.into_owned()));
                }
            }
        }
        for (name, value) in route_match.variables() {
            candidates.insert(name.clone(), value.clone());
        }
        candidates
    }

    /// Fulfill `route_match` from `request` until it is executable.
    pub fn bind<T, B>(&self, route_match: RouteMatch<T>, request: &Request<B>) -> RouteResult<RouteMatch<T>> {
        if route_match.is_decorated() {
            return Ok(route_match);
        }

        let candidates = self.candidate_values(&route_match, request);
        let mut current = route_match;
        while !current.is_executable() {
            let before = current.required_arguments().len();
            current = current.fulfill_arguments(&candidates)?;
            if current.required_arguments().len() == before {
                break;
            }
        }

        if !current.is_executable() && self.config.null_for_missing_nullable {
            let (nullable, remaining): (Vec<_>, Vec<_>) = current
                .required_arguments()
                .iter()
                .cloned()
                .partition(|a| a.is_nullable());
            if !nullable.is_empty() {
                let nulls = nullable
                    .iter()
                    .map(|a| (a.name().to_string(), Value::Null))
                    .collect();
                current = current.fulfill(nulls, remaining)?;
            }
        }

        if !current.is_executable() {
            return Err(current.unsatisfied());
        }
        Ok(current)
    }

    /// Bind then execute.
    pub fn dispatch<T, B>(&self, route_match: RouteMatch<T>, request: &Request<B>) -> RouteResult<T> {
        let route = route_match.route().name().to_string();
        let result = self.bind(route_match, request).and_then(|bound| bound.execute());

        match &result {
            Ok(_) => {
                tracing::debug!(route = %route, path = %request.uri().path(), "Route executed");
                metrics::record_dispatch(&route, "ok");
            }
            Err(e) => {
                tracing::warn!(route = %route, path = %request.uri().path(), error = %e, "Route dispatch failed");
                metrics::record_dispatch(&route, "error");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConversionService, DefaultConversionService};
    use crate::routing::error::RouteError;
    use crate::routing::route::Route;
    use crate::types::{Argument, TypeTag};
    use axum::http::Method;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn conversion() -> Arc<dyn ConversionService> {
        Arc::new(DefaultConversionService::new())
    }

    fn request(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    fn search_match(id: &str) -> RouteMatch<Value> {
        let route = Arc::new(
            Route::uri(Method::GET, "/users/{id}/posts", |args| json!(args)).arguments([
                Argument::new("id", TypeTag::Int),
                Argument::new("limit", TypeTag::Int),
                Argument::new("draft", TypeTag::Bool).nullable(),
            ]),
        );
        let path = BTreeMap::from([("id".to_string(), id.to_string())]);
        RouteMatch::uri(route, conversion(), path).unwrap()
    }

    #[test]
    fn test_dispatch_path_and_query() {
        let dispatcher = RouteDispatcher::default();
        let result = dispatcher
            .dispatch(search_match("7"), &request("/users/7/posts?limit=10&draft=true"))
            .unwrap();
        assert_eq!(result, json!([7, 10, true]));
    }

    #[test]
    fn test_missing_nullable_bound_to_null() {
        let dispatcher = RouteDispatcher::default();
        let bound = dispatcher
            .bind(search_match("7"), &request("/users/7/posts?limit=3"))
            .unwrap();
        assert!(bound.is_executable());
        assert_eq!(bound.variables().get("draft"), Some(&Value::Null));
        assert_eq!(bound.execute().unwrap(), json!([7, 3, null]));
    }

    #[test]
    fn test_path_variable_wins_over_query() {
        let dispatcher = RouteDispatcher::default();
        let result = dispatcher
            .dispatch(search_match("7"), &request("/users/7/posts?id=8&limit=1"))
            .unwrap();
        assert_eq!(result, json!([7, 1, null]));
    }

    #[test]
    fn test_query_binding_disabled() {
        let dispatcher = RouteDispatcher::new(RoutingConfig {
            bind_query_parameters: false,
            null_for_missing_nullable: false,
        });
        let err = dispatcher
            .dispatch(search_match("7"), &request("/users/7/posts?limit=10"))
            .unwrap_err();
        match err {
            RouteError::UnsatisfiedArguments { arguments, .. } => {
                assert_eq!(arguments, vec!["limit".to_string(), "draft".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_conversion_failure() {
        let dispatcher = RouteDispatcher::default();
        let err = dispatcher
            .dispatch(search_match("seven"), &request("/users/seven/posts?limit=1"))
            .unwrap_err();
        assert!(matches!(err, RouteError::Conversion { .. }));
    }

    #[test]
    fn test_decorated_passthrough() {
        let dispatcher = RouteDispatcher::default();
        let decorated = search_match("7").decorate(|_| json!("cached"));
        let result = dispatcher.dispatch(decorated, &request("/users/7/posts")).unwrap();
        assert_eq!(result, json!("cached"));
    }
}
