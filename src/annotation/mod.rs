//! Annotation metadata model.
//!
//! # Data Flow
//! ```text
//! generated metadata (JSON or builder calls)
//!     → metadata.rs (AnnotationMetadata)
//!     → attached to introspections, properties, arguments and routes
//!     → queried by name at request time
//! ```
//!
//! # Design Decisions
//! - Annotations are identified by their fully qualified name
//! - Attribute values reuse the crate-wide `Value` type
//! - Ordered maps keep `Debug` output and serialization deterministic

pub mod metadata;

pub use metadata::{AnnotationMetadata, AnnotationValues, NULLABLE, VALUE_MEMBER};
