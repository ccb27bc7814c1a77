//! Reflection-free bean introspection and route matching.
//!
//! # Architecture Overview
//!
//! ```text
//!   build time (generated code)              request time
//!   ──────────────────────────               ────────────
//!   BeanIntrospectionBuilder                 router picks a Route
//!     add_property / index_property              │
//!     build() ──▶ BeanIntrospection              ▼
//!                    ▲                      RouteMatch (path / status)
//!   IntrospectionReference (lazy, soft)          │ fulfill / fulfill_arguments
//!                    ▲                           ▼
//!   BeanIntrospector (registry)             RouteDispatcher ──▶ decorate? ──▶ execute
//!
//!   Cross-cutting: annotation metadata, type tags, conversion service,
//!                  config (TOML), tracing logs, metrics counters
//! ```

// Shared model
pub mod annotation;
pub mod convert;
pub mod types;

// Core subsystems
pub mod beans;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use serde_json::Value;

pub use annotation::AnnotationMetadata;
pub use beans::{BeanIntrospection, BeanIntrospector, BeanProperty, IntrospectionReference};
pub use config::{Environment, FrameworkConfig};
pub use convert::{ConversionService, DefaultConversionService};
pub use routing::{Route, RouteDispatcher, RouteMatch};
pub use types::{Argument, TypeTag};
