//! Metrics collection.
//!
//! # Metrics
//! - `beanroute_presence_checks_total` (counter): presence resolutions by result
//! - `beanroute_instantiations_total` (counter): instantiations by bean, outcome
//! - `beanroute_dispatch_total` (counter): route dispatches by route, outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; no exporter here
//! - Disabled globally with `set_enabled(false)`

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::counter;

use crate::config::ObservabilityConfig;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Apply the observability configuration.
pub fn configure(config: &ObservabilityConfig) {
    set_enabled(config.metrics_enabled);
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record a resolved presence check.
pub fn record_presence_check(present: bool) {
    if enabled() {
        counter!("beanroute_presence_checks_total", "present" => present.to_string()).increment(1);
    }
}

/// Record an instantiation attempt.
pub fn record_instantiation(bean: &str, outcome: &'static str) {
    if enabled() {
        counter!(
            "beanroute_instantiations_total",
            "bean" => bean.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }
}

/// Record a route dispatch.
pub fn record_dispatch(route: &str, outcome: &'static str) {
    if enabled() {
        counter!(
            "beanroute_dispatch_total",
            "route" => route.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }
}
