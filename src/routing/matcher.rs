//! Route match values.
//!
//! # States
//! - Unfulfilled: required arguments remain
//! - Fulfilled: no required arguments remain, executable
//! - Decorated: execution delegated to a caller-supplied executor
//!
//! # State Transitions
//! ```text
//! Unfulfilled → Unfulfilled/Fulfilled: fulfill (new value, merged variables)
//! Any (not decorated) → Decorated: decorate (variables/arguments frozen)
//! Decorated → fulfill: rejected
//! ```
//!
//! # Design Decisions
//! - Every transition returns a new match; the source is never mutated
//! - A status match exposes no variables, but still carries bound values
//!   for execution
//! - The decorated executor receives the pre-decoration match

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::convert::ConversionService;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::route::{Route, RouteKind};
use crate::types::Argument;

/// Variable bindings of a match, name → value.
pub type Variables = BTreeMap<String, Value>;

/// Replacement execution for a decorated match.
pub type Executor<T> = Arc<dyn Fn(&RouteMatch<T>) -> T + Send + Sync>;

static NO_VARIABLES: Variables = BTreeMap::new();

struct Decoration<T> {
    executor: Executor<T>,
    source: Arc<RouteMatch<T>>,
}

impl<T> Clone for Decoration<T> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            source: self.source.clone(),
        }
    }
}

/// A binding of a request to a route.
pub struct RouteMatch<T> {
    route: Arc<Route<T>>,
    conversion_service: Arc<dyn ConversionService>,
    variables: Variables,
    required_arguments: Vec<Argument>,
    decoration: Option<Decoration<T>>,
}

impl<T> RouteMatch<T> {
    /// Match a URI route with the raw path variables the router extracted.
    pub fn uri(
        route: Arc<Route<T>>,
        conversion_service: Arc<dyn ConversionService>,
        path_variables: BTreeMap<String, String>,
    ) -> RouteResult<Self> {
        if !matches!(route.kind(), RouteKind::Uri { .. }) {
            return Err(RouteError::KindMismatch {
                route: route.name().to_string(),
                expected: "URI",
            });
        }
        let variables = path_variables
            .into_iter()
            .map(|(name, raw)| (name, Value::String(raw)))
            .collect();
        Ok(Self::initial(route, conversion_service, variables))
    }

    /// Match a status route.
    pub fn status(
        route: Arc<Route<T>>,
        conversion_service: Arc<dyn ConversionService>,
    ) -> RouteResult<Self> {
        if route.status_code().is_none() {
            return Err(RouteError::KindMismatch {
                route: route.name().to_string(),
                expected: "status",
            });
        }
        Ok(Self::initial(route, conversion_service, Variables::new()))
    }

    fn initial(
        route: Arc<Route<T>>,
        conversion_service: Arc<dyn ConversionService>,
        variables: Variables,
    ) -> Self {
        let required_arguments = route.declared_arguments().to_vec();
        Self {
            route,
            conversion_service,
            variables,
            required_arguments,
            decoration: None,
        }
    }

    pub fn route(&self) -> &Arc<Route<T>> {
        &self.route
    }

    pub fn conversion_service(&self) -> &Arc<dyn ConversionService> {
        &self.conversion_service
    }

    /// The status this match handles, for status matches.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.route.status_code()
    }

    pub fn http_method(&self) -> Option<&Method> {
        self.route.http_method()
    }

    /// Variable bindings. Always empty for a status match.
    pub fn variables(&self) -> &Variables {
        match self.route.kind() {
            RouteKind::Status(_) => &NO_VARIABLES,
            RouteKind::Uri { .. } => &self.variables,
        }
    }

    /// Every value bound so far, including those of a status match.
    pub fn argument_values(&self) -> &Variables {
        &self.variables
    }

    /// Arguments still to be bound before execution.
    pub fn required_arguments(&self) -> &[Argument] {
        &self.required_arguments
    }

    pub fn is_executable(&self) -> bool {
        self.decoration.is_some() || self.required_arguments.is_empty()
    }

    pub fn is_decorated(&self) -> bool {
        self.decoration.is_some()
    }

    /// New match with `new_variables` merged over the current ones and the
    /// required arguments replaced by `required_arguments`.
    pub fn fulfill(
        &self,
        new_variables: Variables,
        required_arguments: Vec<Argument>,
    ) -> RouteResult<Self> {
        if self.decoration.is_some() {
            return Err(RouteError::Decorated(self.route.name().to_string()));
        }

        let mut variables = self.variables.clone();
        variables.extend(new_variables);
        tracing::debug!(
            route = %self.route.name(),
            bound = variables.len(),
            remaining = required_arguments.len(),
            "Route match fulfilled"
        );

        Ok(Self {
            route: self.route.clone(),
            conversion_service: self.conversion_service.clone(),
            variables,
            required_arguments,
            decoration: None,
        })
    }

    /// Bind the required arguments found in `values`, converting each to
    /// its declared type. Arguments not found (or null and not nullable)
    /// stay required.
    pub fn fulfill_arguments(&self, values: &Variables) -> RouteResult<Self> {
        let mut bound = Variables::new();
        let mut remaining = Vec::new();

        for argument in &self.required_arguments {
            match values.get(argument.name()) {
                Some(Value::Null) if argument.is_nullable() => {
                    bound.insert(argument.name().to_string(), Value::Null);
                }
                Some(raw) if !raw.is_null() => {
                    let converted = self
                        .conversion_service
                        .convert(raw, argument.type_tag())
                        .map_err(|source| RouteError::Conversion {
                            argument: argument.name().to_string(),
                            source,
                        })?;
                    bound.insert(argument.name().to_string(), converted);
                }
                _ => remaining.push(argument.clone()),
            }
        }

        self.fulfill(bound, remaining)
    }

    /// Wrap execution behind `executor`, freezing the current bindings.
    pub fn decorate<F>(&self, executor: F) -> Self
    where
        F: Fn(&RouteMatch<T>) -> T + Send + Sync + 'static,
    {
        tracing::debug!(route = %self.route.name(), "Route match decorated");
        Self {
            route: self.route.clone(),
            conversion_service: self.conversion_service.clone(),
            variables: self.variables.clone(),
            required_arguments: self.required_arguments.clone(),
            decoration: Some(Decoration {
                executor: Arc::new(executor),
                source: Arc::new(self.clone()),
            }),
        }
    }

    /// Execute the match.
    ///
    /// A decorated match returns its executor's result unchanged. Otherwise
    /// the handler is invoked with values in argument order, `Null` standing
    /// in for unbound nullable arguments.
    pub fn execute(&self) -> RouteResult<T> {
        if let Some(decoration) = &self.decoration {
            return Ok((decoration.executor)(&decoration.source));
        }
        if !self.required_arguments.is_empty() {
            return Err(self.unsatisfied());
        }

        let arguments: Vec<Value> = self
            .route
            .declared_arguments()
            .iter()
            .map(|a| self.variables.get(a.name()).cloned().unwrap_or(Value::Null))
            .collect();
        Ok(self.route.invoke(&arguments))
    }

    pub(crate) fn unsatisfied(&self) -> RouteError {
        RouteError::UnsatisfiedArguments {
            route: self.route.name().to_string(),
            arguments: self
                .required_arguments
                .iter()
                .map(|a| a.name().to_string())
                .collect(),
        }
    }
}

impl<T> Clone for RouteMatch<T> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            conversion_service: self.conversion_service.clone(),
            variables: self.variables.clone(),
            required_arguments: self.required_arguments.clone(),
            decoration: self.decoration.clone(),
        }
    }
}

impl<T> fmt::Debug for RouteMatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route.name())
            .field("variables", &self.variables)
            .field("required_arguments", &self.required_arguments)
            .field("decorated", &self.decoration.is_some())
            .finish()
    }
}
