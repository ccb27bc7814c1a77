//! Registry of bean introspection references.
//!
//! # Responsibilities
//! - Hold references for many bean types without loading them
//! - Resolve the introspection of a type for an environment
//! - Pick the primary reference when several are registered
//!
//! # Design Decisions
//! - Keyed by fully qualified type name (DashMap, lock-free reads)
//! - Candidates are copied out of the map before loading so loaders may
//!   re-enter the registry
//! - Multiple enabled primaries resolve to the first registered
//! - Primaries are tried before secondaries; a failed load moves on

use std::sync::Arc;

use dashmap::DashMap;

use crate::beans::error::{IntrospectionError, IntrospectionResult};
use crate::beans::introspection::BeanIntrospection;
use crate::beans::reference::BeanIntrospectionReference;
use crate::config::schema::IntrospectionConfig;
use crate::config::Environment;

/// Shared registry of introspection references.
#[derive(Default)]
pub struct BeanIntrospector {
    references: DashMap<String, Vec<Arc<dyn BeanIntrospectionReference>>>,
    config: IntrospectionConfig,
}

impl BeanIntrospector {
    pub fn new(config: IntrospectionConfig) -> Self {
        Self {
            references: DashMap::new(),
            config,
        }
    }

    /// Register a reference under its bean name.
    pub fn register<R>(&self, reference: R)
    where
        R: BeanIntrospectionReference + 'static,
    {
        self.register_arc(Arc::new(reference));
    }

    pub fn register_arc(&self, reference: Arc<dyn BeanIntrospectionReference>) {
        if self.config.eager_presence_check && !reference.is_present() {
            tracing::info!(bean = %reference.name(), "Registered introspection reference is absent");
        }
        self.references
            .entry(reference.name().to_string())
            .or_default()
            .push(reference);
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.references.iter().map(|r| r.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All references, ordered by bean name then registration order.
    pub fn references(&self) -> Vec<Arc<dyn BeanIntrospectionReference>> {
        let mut entries: Vec<_> = self
            .references
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().flat_map(|(_, refs)| refs).collect()
    }

    /// Enabled references whose metadata carries `annotation`.
    pub fn find_references_annotated(
        &self,
        annotation: &str,
        environment: &Environment,
    ) -> Vec<Arc<dyn BeanIntrospectionReference>> {
        self.references()
            .into_iter()
            .filter(|r| r.annotation_metadata().has_annotation(annotation))
            .filter(|r| r.is_enabled(environment))
            .collect()
    }

    /// The introspection of `T`, if an enabled reference exists and loads.
    pub fn find_introspection<T: 'static>(
        &self,
        environment: &Environment,
    ) -> Option<Arc<BeanIntrospection<T>>> {
        let name = std::any::type_name::<T>();
        let registered = self.references.get(name)?.value().clone();
        let candidates: Vec<_> = registered
            .into_iter()
            .filter(|r| r.is_enabled(environment))
            .collect();

        let (primaries, others): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|r| r.is_primary());
        if primaries.len() > 1 && self.config.warn_on_duplicate_primary {
            tracing::warn!(
                bean = %name,
                count = primaries.len(),
                "Multiple primary introspections registered, using the first"
            );
        }

        // A candidate that fails to load falls through to the next one.
        primaries.iter().chain(others.iter()).find_map(|r| match r.load_any() {
            Ok(loaded) => loaded.downcast::<BeanIntrospection<T>>().ok(),
            Err(e) => {
                tracing::warn!(bean = %name, error = %e, "Failed to load bean introspection");
                None
            }
        })
    }

    /// Like [`Self::find_introspection`] but fails when none is available.
    pub fn get_introspection<T: 'static>(
        &self,
        environment: &Environment,
    ) -> IntrospectionResult<Arc<BeanIntrospection<T>>> {
        self.find_introspection(environment).ok_or_else(|| {
            IntrospectionError::NoIntrospection(std::any::type_name::<T>().to_string())
        })
    }

    /// Resolve presence for every reference and log a summary.
    /// Returns the number of present references.
    pub fn verify(&self) -> usize {
        let references = self.references();
        let present = references.iter().filter(|r| r.is_present()).count();
        tracing::info!(
            total = references.len(),
            present,
            absent = references.len() - present,
            "Bean introspection references verified"
        );
        present
    }
}
