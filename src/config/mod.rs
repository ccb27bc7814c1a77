//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FrameworkConfig (validated, immutable)
//!     → environment.rs (active profiles for enablement checks)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validation;

pub use environment::Environment;
pub use schema::FrameworkConfig;
pub use schema::EnvironmentConfig;
pub use schema::IntrospectionConfig;
pub use schema::RoutingConfig;
pub use schema::ObservabilityConfig;
