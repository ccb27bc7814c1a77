//! Type descriptors shared by the introspection and routing subsystems.
//!
//! # Design Decisions
//! - Values are `serde_json::Value`; `Value::Null` is the only null
//! - Declared types are plain tags checked by comparison, never reflection
//! - No numeric widening: an integer is not assignable to `Float`

pub mod argument;

pub use argument::{Argument, TypeTag};
