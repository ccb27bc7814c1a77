//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the host decides where they go
//! - Metrics are cheap (no-ops until a recorder is installed)
//! - Bean and route names are used as labels

pub mod logging;
pub mod metrics;
