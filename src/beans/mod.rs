//! Reflection-free bean introspection.
//!
//! # Data Flow
//! ```text
//! Population (generated code, once per bean type):
//!     BeanIntrospectionBuilder
//!     → add_property (property.rs descriptors, declaration order)
//!     → index_property / index_property_value (annotation indexes)
//!     → build() publishes an immutable BeanIntrospection
//!
//! Lookup (request time, many readers):
//!     introspector.rs (registry of references, keyed by bean name)
//!     → reference.rs (soft presence check, lazy load)
//!     → introspection.rs (property / index / constructor queries, instantiate)
//! ```
//!
//! # Design Decisions
//! - The builder is consumed by `build()`, so nothing registers after publication
//! - Indexes start empty rather than absent
//! - Introspection identity is the bean type, not the contents
//! - Presence failures are absorbed; every other failure is a typed error

pub mod bean_type;
pub mod error;
pub mod introspection;
pub mod introspector;
pub mod property;
pub mod reference;

pub use bean_type::BeanType;
pub use error::{InstantiationError, IntrospectionError, IntrospectionResult, ResolutionError};
pub use introspection::{BeanIntrospection, BeanIntrospectionBuilder, Instantiator};
pub use introspector::BeanIntrospector;
pub use property::BeanProperty;
pub use reference::{BeanIntrospectionReference, IntrospectionReference, Presence, ProfileGated};
