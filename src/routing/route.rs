//! Compiled route definitions.
//!
//! # Responsibilities
//! - Describe what a route responds to (method + URI template, or a status)
//! - Declare the handler's arguments in invocation order
//! - Invoke the handler with positional argument values
//!
//! # Design Decisions
//! - Routes are immutable and shared via `Arc` by every match
//! - The handler receives values already converted to the declared types

use std::fmt;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::annotation::AnnotationMetadata;
use crate::types::Argument;

/// Handler invoked with argument values in declaration order.
pub type Handler<T> = Arc<dyn Fn(&[Value]) -> T + Send + Sync>;

/// What a route responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A request method and URI template.
    Uri { method: Method, template: String },
    /// An HTTP status produced elsewhere in the pipeline.
    Status(StatusCode),
}

/// A compiled route.
pub struct Route<T> {
    name: String,
    kind: RouteKind,
    arguments: Vec<Argument>,
    annotation_metadata: AnnotationMetadata,
    handler: Handler<T>,
}

impl<T> Route<T> {
    /// Route for `method` requests matching `template`.
    pub fn uri<F>(method: Method, template: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> T + Send + Sync + 'static,
    {
        let template = template.into();
        Self {
            name: format!("{} {}", method, template),
            kind: RouteKind::Uri { method, template },
            arguments: Vec::new(),
            annotation_metadata: AnnotationMetadata::default(),
            handler: Arc::new(handler),
        }
    }

    /// Route handling responses with `status`.
    pub fn status<F>(status: StatusCode, handler: F) -> Self
    where
        F: Fn(&[Value]) -> T + Send + Sync + 'static,
    {
        Self {
            name: format!("status {}", status.as_u16()),
            kind: RouteKind::Status(status),
            arguments: Vec::new(),
            annotation_metadata: AnnotationMetadata::default(),
            handler: Arc::new(handler),
        }
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_annotation_metadata(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = metadata;
        self
    }

    /// Identifier for logging and metrics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn declared_arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self.kind {
            RouteKind::Status(status) => Some(status),
            RouteKind::Uri { .. } => None,
        }
    }

    pub fn http_method(&self) -> Option<&Method> {
        match &self.kind {
            RouteKind::Uri { method, .. } => Some(method),
            RouteKind::Status(_) => None,
        }
    }

    /// Call the handler.
    pub fn invoke(&self, arguments: &[Value]) -> T {
        (self.handler)(arguments)
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("arguments", &self.arguments)
            .finish()
    }
}
