//! Routing error definitions.

use thiserror::Error;

use crate::convert::ConversionError;

/// Errors raised while binding or executing a route match.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Fulfillment was attempted on a decorated match.
    #[error("Route [{0}] is decorated and can no longer be fulfilled")]
    Decorated(String),

    /// Execution was attempted while arguments remain unbound.
    #[error("Route [{route}] is missing required arguments: {}", .arguments.join(", "))]
    UnsatisfiedArguments { route: String, arguments: Vec<String> },

    /// A supplied value could not be converted to the argument type.
    #[error("Failed to bind argument [{argument}]: {source}")]
    Conversion {
        argument: String,
        #[source]
        source: ConversionError,
    },

    /// A match was constructed for a route of the wrong kind.
    #[error("Route [{route}] is not a {expected} route")]
    KindMismatch { route: String, expected: &'static str },
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
