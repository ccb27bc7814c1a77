//! Soft-loading references to bean introspections.
//!
//! # States
//! - Unknown: presence not yet resolved
//! - Present: the bean type resolved
//! - Absent: resolution failed or panicked
//!
//! # State Transitions
//! ```text
//! Unknown → Present: first is_present() resolves the type
//! Unknown → Absent: first is_present() fails (error or panic)
//! Present/Absent: terminal
//! ```
//!
//! # Design Decisions
//! - Presence is one atomic byte; racing first calls may both resolve, the
//!   first stored result wins
//! - Failures while checking presence are logged and absorbed
//! - Loading is separate from presence and reports typed errors

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use crate::annotation::AnnotationMetadata;
use crate::beans::bean_type::BeanType;
use crate::beans::error::ResolutionError;
use crate::beans::introspection::BeanIntrospection;
use crate::config::Environment;
use crate::observability::metrics;

/// Cached presence of a referenced bean type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Unknown = 0,
    Present = 1,
    Absent = 2,
}

impl From<u8> for Presence {
    fn from(val: u8) -> Self {
        match val {
            1 => Presence::Present,
            2 => Presence::Absent,
            _ => Presence::Unknown,
        }
    }
}

/// Type-erased view of a reference, as held by the registry.
pub trait BeanIntrospectionReference: Send + Sync {
    /// Fully qualified bean type name. Available without loading.
    fn name(&self) -> &str;

    fn annotation_metadata(&self) -> &AnnotationMetadata;

    /// Whether the bean type can be resolved. Never fails.
    fn is_present(&self) -> bool;

    /// Whether the introspection should be used in `environment`.
    fn is_enabled(&self, _environment: &Environment) -> bool {
        self.is_present()
    }

    /// Whether this reference is the canonical one for its bean type.
    fn is_primary(&self) -> bool {
        true
    }

    /// Load the introspection as `Arc<BeanIntrospection<T>>` behind `dyn Any`.
    fn load_any(&self) -> Result<Arc<dyn Any + Send + Sync>, ResolutionError>;
}

type TypeResolver = Box<dyn Fn() -> Result<BeanType, ResolutionError> + Send + Sync>;
type IntrospectionLoader<T> =
    Box<dyn Fn() -> Result<BeanIntrospection<T>, ResolutionError> + Send + Sync>;

/// Lazily resolved handle to the introspection of `T`.
pub struct IntrospectionReference<T> {
    name: String,
    annotation_metadata: AnnotationMetadata,
    primary: bool,
    resolver: TypeResolver,
    loader: IntrospectionLoader<T>,
    presence: AtomicU8,
    loaded: OnceLock<Arc<BeanIntrospection<T>>>,
}

impl<T: 'static> IntrospectionReference<T> {
    /// Create a reference whose type always resolves.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<BeanIntrospection<T>, ResolutionError> + Send + Sync + 'static,
    {
        Self {
            name: std::any::type_name::<T>().to_string(),
            annotation_metadata: AnnotationMetadata::default(),
            primary: true,
            resolver: Box::new(|| Ok(BeanType::of::<T>())),
            loader: Box::new(loader),
            presence: AtomicU8::new(Presence::Unknown as u8),
            loaded: OnceLock::new(),
        }
    }

    /// Replace the type resolver consulted by [`Self::is_present`].
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn() -> Result<BeanType, ResolutionError> + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_annotation_metadata(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = metadata;
        self
    }

    /// Mark the reference as non-primary.
    pub fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }

    pub fn presence(&self) -> Presence {
        Presence::from(self.presence.load(Ordering::Acquire))
    }

    /// Resolve presence once and cache it.
    pub fn is_present(&self) -> bool {
        match self.presence() {
            Presence::Present => return true,
            Presence::Absent => return false,
            Presence::Unknown => {}
        }

        let resolved = match panic::catch_unwind(AssertUnwindSafe(|| (self.resolver)())) {
            Ok(Ok(_)) => Presence::Present,
            Ok(Err(e)) => {
                tracing::warn!(bean = %self.name, error = %e, "Bean introspection unavailable");
                Presence::Absent
            }
            Err(_) => {
                tracing::warn!(bean = %self.name, "Bean type resolution panicked");
                Presence::Absent
            }
        };

        let stored = match self.presence.compare_exchange(
            Presence::Unknown as u8,
            resolved as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => resolved,
            Err(existing) => Presence::from(existing),
        };
        metrics::record_presence_check(stored == Presence::Present);
        stored == Presence::Present
    }

    /// Load the introspection, caching the first successful load.
    pub fn load(&self) -> Result<Arc<BeanIntrospection<T>>, ResolutionError> {
        if let Some(loaded) = self.loaded.get() {
            return Ok(loaded.clone());
        }
        if !self.is_present() {
            return Err(ResolutionError::Missing(self.name.clone()));
        }
        let introspection = Arc::new((self.loader)()?);
        Ok(self.loaded.get_or_init(|| introspection).clone())
    }
}

impl<T: 'static> BeanIntrospectionReference for IntrospectionReference<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }

    fn is_present(&self) -> bool {
        IntrospectionReference::is_present(self)
    }

    fn is_primary(&self) -> bool {
        self.primary
    }

    fn load_any(&self) -> Result<Arc<dyn Any + Send + Sync>, ResolutionError> {
        let loaded: Arc<dyn Any + Send + Sync> = self.load()?;
        Ok(loaded)
    }
}

/// Enables a reference only while all listed profiles are active.
pub struct ProfileGated<R> {
    inner: R,
    profiles: Vec<String>,
}

impl<R: BeanIntrospectionReference> ProfileGated<R> {
    pub fn new<I, S>(inner: R, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: BeanIntrospectionReference> BeanIntrospectionReference for ProfileGated<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn annotation_metadata(&self) -> &AnnotationMetadata {
        self.inner.annotation_metadata()
    }

    fn is_present(&self) -> bool {
        self.inner.is_present()
    }

    fn is_enabled(&self, environment: &Environment) -> bool {
        self.inner.is_enabled(environment)
            && self.profiles.iter().all(|p| environment.is_active(p))
    }

    fn is_primary(&self) -> bool {
        self.inner.is_primary()
    }

    fn load_any(&self) -> Result<Arc<dyn Any + Send + Sync>, ResolutionError> {
        self.inner.load_any()
    }
}
