//! Queryable annotation metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the annotation marking an argument as accepting null.
pub const NULLABLE: &str = "Nullable";

/// Default member name of an annotation attribute.
pub const VALUE_MEMBER: &str = "value";

/// Attributes of a single annotation (member name → value).
pub type AnnotationValues = BTreeMap<String, Value>;

/// Annotation metadata of an element: annotation name → attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationMetadata {
    annotations: BTreeMap<String, AnnotationValues>,
}

impl AnnotationMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse metadata from its JSON form, e.g. `{"Column": {"value": "id"}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add an annotation without attributes.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.entry(annotation.into()).or_default();
        self
    }

    /// Add (or extend) an annotation with a single attribute.
    pub fn with_value(
        mut self,
        annotation: impl Into<String>,
        member: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.annotations
            .entry(annotation.into())
            .or_default()
            .insert(member.into(), value.into());
        self
    }

    /// Returns true if the annotation is present.
    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.contains_key(annotation)
    }

    /// All annotation names, sorted.
    pub fn annotation_names(&self) -> impl Iterator<Item = &str> {
        self.annotations.keys().map(String::as_str)
    }

    /// All attributes of an annotation.
    pub fn values(&self, annotation: &str) -> Option<&AnnotationValues> {
        self.annotations.get(annotation)
    }

    /// A single attribute of an annotation.
    pub fn value(&self, annotation: &str, member: &str) -> Option<&Value> {
        self.annotations.get(annotation)?.get(member)
    }

    /// A single attribute, only if it is a string.
    pub fn string_value(&self, annotation: &str, member: &str) -> Option<&str> {
        self.value(annotation, member)?.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
