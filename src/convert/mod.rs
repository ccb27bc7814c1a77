//! Value conversion.
//!
//! # Data Flow
//! ```text
//! raw request value (path variable / query parameter, usually a string)
//!     → service.rs (ConversionService::convert to the argument's TypeTag)
//!     → converted Value bound into a RouteMatch
//! ```
//!
//! # Design Decisions
//! - Conversion is a trait so routes can share any implementation via `Arc`
//! - Values already of the target type pass through untouched
//! - Conversions never lose information silently (no float → int)

pub mod service;

pub use service::{ConversionError, ConversionService, DefaultConversionService};
