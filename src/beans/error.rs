//! Introspection error definitions.

use serde_json::Value;
use thiserror::Error;

/// Errors raised by introspection population and lookup.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// An operation was called out of order (e.g. indexing before registration).
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A required property does not exist.
    #[error("No property [{property}] exists for bean type {bean}")]
    NoSuchProperty { bean: String, property: String },

    /// The property has no reader.
    #[error("Property [{0}] is write-only")]
    WriteOnly(String),

    /// The property has no writer.
    #[error("Property [{0}] is read-only")]
    ReadOnly(String),

    /// A value of the wrong type was written to a property.
    #[error("Invalid value [{value}] specified for property: {property}")]
    InvalidPropertyValue { value: Value, property: String },

    /// No enabled introspection is registered for the type.
    #[error("No bean introspection available for type [{0}]")]
    NoIntrospection(String),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Result type for introspection operations.
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;

/// Errors raised while instantiating a bean from constructor arguments.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstantiationError {
    #[error("Argument count [{supplied}] doesn't match required argument count: {required}")]
    ArgumentCount { supplied: usize, required: usize },

    #[error("Null argument specified for [{argument}]. If this argument is allowed be null mark it nullable")]
    NullArgument { argument: String },

    #[error("Invalid argument [{value}] specified for argument: {argument}")]
    InvalidArgument { value: Value, argument: String },

    /// The generated constructor itself failed or is missing.
    #[error("Cannot instantiate {bean}: {reason}")]
    Failed { bean: String, reason: String },
}

/// Failure to resolve the type behind an introspection reference.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolutionError {
    /// The bean type is not available in this build.
    #[error("Bean type [{0}] is not available")]
    Missing(String),

    /// The bean type exists but one of its dependencies does not.
    #[error("Linkage error resolving [{name}]: {reason}")]
    Linkage { name: String, reason: String },
}
