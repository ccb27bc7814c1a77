//! Declared types and argument descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annotation::{AnnotationMetadata, NULLABLE};

/// Declared type of an argument or property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    /// Accepts any non-null value.
    Any,
}

impl TypeTag {
    /// Runtime tag of a value. `None` for `Value::Null`.
    pub fn of(value: &Value) -> Option<TypeTag> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(TypeTag::Bool),
            Value::Number(n) if n.is_f64() => Some(TypeTag::Float),
            Value::Number(_) => Some(TypeTag::Int),
            Value::String(_) => Some(TypeTag::String),
            Value::Array(_) => Some(TypeTag::Array),
            Value::Object(_) => Some(TypeTag::Object),
        }
    }

    /// Returns true if a value of this declared type may hold `value`.
    /// Null is never an instance; nullability is checked separately.
    pub fn is_instance(&self, value: &Value) -> bool {
        match TypeTag::of(value) {
            None => false,
            Some(_) if *self == TypeTag::Any => true,
            Some(actual) => actual == *self,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Bool => "Bool",
            TypeTag::Int => "Int",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::Array => "Array",
            TypeTag::Object => "Object",
            TypeTag::Any => "Any",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, typed argument of a constructor or route handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    type_tag: TypeTag,
    nullable: bool,
    annotation_metadata: AnnotationMetadata,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            nullable: false,
            annotation_metadata: AnnotationMetadata::default(),
        }
    }

    /// Mark the argument as accepting null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_annotation_metadata(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = metadata;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// True if flagged nullable or annotated with [`NULLABLE`].
    pub fn is_nullable(&self) -> bool {
        self.nullable || self.annotation_metadata.has_annotation(NULLABLE)
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_tag, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_of() {
        assert_eq!(TypeTag::of(&json!(null)), None);
        assert_eq!(TypeTag::of(&json!(true)), Some(TypeTag::Bool));
        assert_eq!(TypeTag::of(&json!(42)), Some(TypeTag::Int));
        assert_eq!(TypeTag::of(&json!(-7)), Some(TypeTag::Int));
        assert_eq!(TypeTag::of(&json!(1.5)), Some(TypeTag::Float));
        assert_eq!(TypeTag::of(&json!("a")), Some(TypeTag::String));
        assert_eq!(TypeTag::of(&json!([1])), Some(TypeTag::Array));
        assert_eq!(TypeTag::of(&json!({"a": 1})), Some(TypeTag::Object));
    }

    #[test]
    fn test_is_instance() {
        assert!(TypeTag::Int.is_instance(&json!(3)));
        assert!(!TypeTag::Float.is_instance(&json!(3))); // No widening
        assert!(!TypeTag::Int.is_instance(&json!("3")));
        assert!(TypeTag::Any.is_instance(&json!("3")));
        assert!(!TypeTag::Any.is_instance(&Value::Null));
    }

    #[test]
    fn test_argument_nullability() {
        let plain = Argument::new("name", TypeTag::String);
        assert!(!plain.is_nullable());
        assert!(plain.clone().nullable().is_nullable());

        let annotated = Argument::new("nickname", TypeTag::String)
            .with_annotation_metadata(AnnotationMetadata::new().with_annotation(NULLABLE));
        assert!(annotated.is_nullable());
        assert_eq!(annotated.to_string(), "String nickname");
    }
}
