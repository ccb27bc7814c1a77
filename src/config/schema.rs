//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the framework.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Active environment (profiles).
    pub environment: EnvironmentConfig,

    /// Bean introspection registry settings.
    pub introspection: IntrospectionConfig,

    /// Route argument binding settings.
    pub routing: RoutingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Environment configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Profiles that are active (e.g., "dev", "cloud").
    pub active_profiles: Vec<String>,
}

/// Introspection registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Resolve presence of each reference when it is registered.
    pub eager_presence_check: bool,

    /// Log a warning when several primary references exist for one type.
    pub warn_on_duplicate_primary: bool,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            eager_presence_check: false,
            warn_on_duplicate_primary: true,
        }
    }
}

/// Route argument binding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Bind query string parameters to route arguments.
    pub bind_query_parameters: bool,

    /// Bind null to nullable arguments left unbound.
    pub null_for_missing_nullable: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            bind_query_parameters: true,
            null_for_missing_nullable: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format ("compact" or "pretty").
    pub log_format: String,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
            metrics_enabled: true,
        }
    }
}
