//! Bean introspection and its population builder.
//!
//! # Responsibilities
//! - Hold the ordered property map of a bean type
//! - Maintain the annotation and annotation-value indexes
//! - Validate constructor arguments and delegate instantiation
//!
//! # Design Decisions
//! - Duplicate property registration replaces in place (last write wins)
//! - Index lists keep registration order and allow duplicates
//! - Value index collisions overwrite (last write wins)
//! - Equality and hash use the bean type only

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::annotation::AnnotationMetadata;
use crate::beans::bean_type::BeanType;
use crate::beans::error::{InstantiationError, IntrospectionError, IntrospectionResult};
use crate::beans::property::BeanProperty;
use crate::observability::metrics;
use crate::types::Argument;

/// Reflection-free constructor emitted by generated code.
///
/// Receives arguments already validated against the constructor signature.
pub type Instantiator<T> = Arc<dyn Fn(&[Value]) -> Result<T, InstantiationError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AnnotationValueKey {
    annotation: String,
    value: String,
}

/// Precomputed description of a bean type.
pub struct BeanIntrospection<T> {
    bean_type: BeanType,
    annotation_metadata: AnnotationMetadata,
    properties: Vec<Arc<BeanProperty<T>>>,
    positions: HashMap<String, usize>,
    constructor_arguments: Vec<Argument>,
    indexed: HashMap<String, Vec<Arc<BeanProperty<T>>>>,
    indexed_values: HashMap<AnnotationValueKey, Arc<BeanProperty<T>>>,
    instantiator: Option<Instantiator<T>>,
}

impl<T: 'static> BeanIntrospection<T> {
    /// Start populating an introspection for `T`.
    ///
    /// `property_count` is a capacity hint.
    pub fn builder(property_count: usize) -> BeanIntrospectionBuilder<T> {
        BeanIntrospectionBuilder {
            inner: BeanIntrospection {
                bean_type: BeanType::of::<T>(),
                annotation_metadata: AnnotationMetadata::default(),
                properties: Vec::with_capacity(property_count),
                positions: HashMap::with_capacity(property_count),
                constructor_arguments: Vec::new(),
                indexed: HashMap::new(),
                indexed_values: HashMap::new(),
                instantiator: None,
            },
        }
    }
}

impl<T> BeanIntrospection<T> {
    pub fn bean_type(&self) -> BeanType {
        self.bean_type
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }

    pub fn constructor_arguments(&self) -> &[Argument] {
        &self.constructor_arguments
    }

    /// All properties in declaration order.
    pub fn bean_properties(&self) -> impl Iterator<Item = &BeanProperty<T>> {
        self.properties.iter().map(|p| p.as_ref())
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name())
    }

    pub fn get_property(&self, name: &str) -> Option<&BeanProperty<T>> {
        self.positions.get(name).map(|&i| self.properties[i].as_ref())
    }

    pub fn get_required_property(&self, name: &str) -> IntrospectionResult<&BeanProperty<T>> {
        self.get_property(name)
            .ok_or_else(|| IntrospectionError::NoSuchProperty {
                bean: self.bean_type.name().to_string(),
                property: name.to_string(),
            })
    }

    /// Properties indexed under `annotation`, in registration order.
    pub fn get_indexed_properties(&self, annotation: &str) -> Vec<&BeanProperty<T>> {
        self.indexed
            .get(annotation)
            .map(|list| list.iter().map(|p| p.as_ref()).collect())
            .unwrap_or_default()
    }

    /// Every property of the bean, indexed or not.
    ///
    /// This is the annotation-less form of [`Self::get_indexed_properties`];
    /// it does not consult the indexes.
    pub fn get_all_indexed_properties(&self) -> Vec<&BeanProperty<T>> {
        self.bean_properties().collect()
    }

    /// The property registered for `(annotation, value)`.
    pub fn get_indexed_property(&self, annotation: &str, value: &str) -> Option<&BeanProperty<T>> {
        if value.is_empty() {
            return None;
        }
        let key = AnnotationValueKey {
            annotation: annotation.to_string(),
            value: value.to_string(),
        };
        self.indexed_values.get(&key).map(|p| p.as_ref())
    }

    /// Validate `arguments` against the constructor and build a bean.
    pub fn instantiate(&self, arguments: &[Value]) -> Result<T, InstantiationError> {
        let result = self.validate_arguments(arguments).and_then(|()| match &self.instantiator {
            Some(instantiator) => instantiator(arguments),
            None => Err(InstantiationError::Failed {
                bean: self.bean_type.name().to_string(),
                reason: "no constructor is available".to_string(),
            }),
        });

        match &result {
            Ok(_) => metrics::record_instantiation(self.bean_type.name(), "ok"),
            Err(e) => {
                tracing::debug!(bean = %self.bean_type, error = %e, "Bean instantiation rejected");
                metrics::record_instantiation(self.bean_type.name(), "error");
            }
        }
        result
    }

    fn validate_arguments(&self, arguments: &[Value]) -> Result<(), InstantiationError> {
        if self.constructor_arguments.len() != arguments.len() {
            return Err(InstantiationError::ArgumentCount {
                supplied: arguments.len(),
                required: self.constructor_arguments.len(),
            });
        }

        for (argument, specified) in self.constructor_arguments.iter().zip(arguments) {
            if specified.is_null() {
                if argument.is_nullable() {
                    continue;
                }
                return Err(InstantiationError::NullArgument {
                    argument: argument.name().to_string(),
                });
            }
            if !argument.type_tag().is_instance(specified) {
                return Err(InstantiationError::InvalidArgument {
                    value: specified.clone(),
                    argument: argument.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<T, U> PartialEq<BeanIntrospection<U>> for BeanIntrospection<T> {
    fn eq(&self, other: &BeanIntrospection<U>) -> bool {
        self.bean_type == other.bean_type
    }
}

impl<T> Eq for BeanIntrospection<T> {}

impl<T> Hash for BeanIntrospection<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bean_type.hash(state);
    }
}

impl<T> fmt::Debug for BeanIntrospection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanIntrospection")
            .field("type", &self.bean_type.name())
            .field("properties", &self.properties.len())
            .field("constructor_arguments", &self.constructor_arguments.len())
            .finish()
    }
}

impl<T> fmt::Display for BeanIntrospection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BeanIntrospection{{type={}}}", self.bean_type)
    }
}

/// Population phase of a [`BeanIntrospection`].
///
/// Generated code registers every property exactly once; the builder does
/// not check for duplicates.
pub struct BeanIntrospectionBuilder<T> {
    inner: BeanIntrospection<T>,
}

impl<T> BeanIntrospectionBuilder<T> {
    pub fn annotation_metadata(&mut self, metadata: AnnotationMetadata) -> &mut Self {
        self.inner.annotation_metadata = metadata;
        self
    }

    pub fn constructor_arguments(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.inner.constructor_arguments = arguments;
        self
    }

    pub fn instantiator<F>(&mut self, instantiator: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<T, InstantiationError> + Send + Sync + 'static,
    {
        self.inner.instantiator = Some(Arc::new(instantiator));
        self
    }

    /// Register a property. A second registration under the same name
    /// replaces the first but keeps its position.
    pub fn add_property(&mut self, property: BeanProperty<T>) -> &mut Self {
        let inner = &mut self.inner;
        let property = Arc::new(property);
        match inner.positions.get(property.name()) {
            Some(&i) => inner.properties[i] = property,
            None => {
                inner
                    .positions
                    .insert(property.name().to_string(), inner.properties.len());
                inner.properties.push(property);
            }
        }
        self
    }

    /// Index an already registered property under `annotation`.
    ///
    /// An empty property name is ignored.
    pub fn index_property(
        &mut self,
        annotation: &str,
        property_name: &str,
    ) -> IntrospectionResult<&mut Self> {
        if property_name.is_empty() {
            return Ok(self);
        }
        let property = self.registered(property_name)?;
        self.inner
            .indexed
            .entry(annotation.to_string())
            .or_default()
            .push(property);
        Ok(self)
    }

    /// Index a property under `annotation` and under `(annotation, value)`.
    ///
    /// The value index is only written when both the property name and the
    /// annotation value are non-empty.
    pub fn index_property_value(
        &mut self,
        annotation: &str,
        property_name: &str,
        annotation_value: &str,
    ) -> IntrospectionResult<&mut Self> {
        self.index_property(annotation, property_name)?;
        if !annotation_value.is_empty() && !property_name.is_empty() {
            let property = self.registered(property_name)?;
            let key = AnnotationValueKey {
                annotation: annotation.to_string(),
                value: annotation_value.to_string(),
            };
            self.inner.indexed_values.insert(key, property);
        }
        Ok(self)
    }

    /// Publish the introspection. No further registration is possible.
    pub fn build(self) -> BeanIntrospection<T> {
        tracing::debug!(
            bean = %self.inner.bean_type,
            properties = self.inner.properties.len(),
            indexed_annotations = self.inner.indexed.len(),
            "Bean introspection published"
        );
        self.inner
    }

    fn registered(&self, property_name: &str) -> IntrospectionResult<Arc<BeanProperty<T>>> {
        self.inner
            .positions
            .get(property_name)
            .map(|&i| self.inner.properties[i].clone())
            .ok_or_else(|| {
                IntrospectionError::IllegalState(format!(
                    "Invalid introspection generated for {}: property [{}] indexed before registration. Call add_property first!",
                    self.inner.bean_type, property_name
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    #[derive(Debug, PartialEq)]
    struct Book {
        title: String,
        pages: i64,
        subtitle: Option<String>,
    }

    struct Shelf;

    fn title() -> BeanProperty<Book> {
        BeanProperty::<Book>::new("title", TypeTag::String).reader(|b| Value::from(b.title.clone()))
    }

    fn pages() -> BeanProperty<Book> {
        BeanProperty::<Book>::new("pages", TypeTag::Int).reader(|b| Value::from(b.pages))
    }

    fn book_introspection() -> BeanIntrospection<Book> {
        let mut builder = BeanIntrospection::<Book>::builder(2);
        builder
            .add_property(title())
            .add_property(pages())
            .constructor_arguments(vec![
                Argument::new("title", TypeTag::String),
                Argument::new("pages", TypeTag::Int),
                Argument::new("subtitle", TypeTag::String).nullable(),
            ])
            .instantiator(|args| {
                Ok(Book {
                    title: args[0].as_str().unwrap_or_default().to_string(),
                    pages: args[1].as_i64().unwrap_or_default(),
                    subtitle: args[2].as_str().map(str::to_string),
                })
            });
        builder.index_property_value("Column", "title", "book_title").unwrap();
        builder.index_property("Column", "pages").unwrap();
        builder.build()
    }

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_property_lookup() {
        let intro = book_introspection();
        assert_eq!(intro.property_names().collect::<Vec<_>>(), vec!["title", "pages"]);
        assert_eq!(intro.get_property("pages").unwrap().type_tag(), TypeTag::Int);
        assert!(intro.get_property("isbn").is_none());

        let err = intro.get_required_property("isbn").unwrap_err();
        assert!(matches!(err, IntrospectionError::NoSuchProperty { .. }));
    }

    #[test]
    fn test_duplicate_registration_last_wins() {
        let mut builder = BeanIntrospection::<Book>::builder(2);
        builder
            .add_property(title())
            .add_property(pages())
            .add_property(BeanProperty::new("title", TypeTag::Any));
        let intro = builder.build();

        assert_eq!(intro.get_property("title").unwrap().type_tag(), TypeTag::Any);
        // Position of the first registration is kept.
        assert_eq!(intro.property_names().collect::<Vec<_>>(), vec!["title", "pages"]);
    }

    #[test]
    fn test_index_before_add_fails() {
        let mut builder = BeanIntrospection::<Book>::builder(1);
        let err = builder.index_property("Column", "title").err().unwrap();
        assert!(matches!(err, IntrospectionError::IllegalState(_)));
        assert!(err.to_string().contains("Call add_property first"));

        let err = builder.index_property_value("Column", "title", "t").err().unwrap();
        assert!(matches!(err, IntrospectionError::IllegalState(_)));

        // Empty names are ignored rather than rejected.
        assert!(builder.index_property("Column", "").is_ok());
    }

    #[test]
    fn test_indexed_properties() {
        let intro = book_introspection();
        let names: Vec<_> = intro
            .get_indexed_properties("Column")
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["title", "pages"]);
        assert!(intro.get_indexed_properties("Id").is_empty());
        assert_eq!(intro.get_all_indexed_properties().len(), 2);
    }

    #[test]
    fn test_indexed_property_by_value() {
        let intro = book_introspection();
        assert_eq!(
            intro.get_indexed_property("Column", "book_title").unwrap().name(),
            "title"
        );
        assert!(intro.get_indexed_property("Column", "").is_none());
        assert!(intro.get_indexed_property("Column", "pages").is_none());
        assert!(intro.get_indexed_property("Id", "book_title").is_none());
    }

    #[test]
    fn test_value_index_last_wins_and_duplicates_kept() {
        let mut builder = BeanIntrospection::<Book>::builder(2);
        builder.add_property(title()).add_property(pages());
        builder.index_property_value("Column", "title", "name").unwrap();
        builder.index_property_value("Column", "pages", "name").unwrap();
        builder.index_property("Column", "pages").unwrap();
        builder.index_property_value("Column", "pages", "").unwrap();
        let intro = builder.build();

        assert_eq!(intro.get_indexed_property("Column", "name").unwrap().name(), "pages");
        let names: Vec<_> = intro
            .get_indexed_properties("Column")
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["title", "pages", "pages", "pages"]);
    }

    #[test]
    fn test_instantiate() {
        let intro = book_introspection();
        let book = intro.instantiate(&[json!("Dune"), json!(412), Value::Null]).unwrap();
        assert_eq!(
            book,
            Book { title: "Dune".into(), pages: 412, subtitle: None }
        );
    }

    #[test]
    fn test_instantiate_argument_count() {
        let intro = book_introspection();
        let err = intro.instantiate(&[json!("Dune")]).unwrap_err();
        assert_eq!(err, InstantiationError::ArgumentCount { supplied: 1, required: 3 });
        assert!(err.to_string().contains("[1]"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_instantiate_null_argument() {
        let intro = book_introspection();
        let err = intro
            .instantiate(&[Value::Null, json!(1), Value::Null])
            .unwrap_err();
        assert_eq!(err, InstantiationError::NullArgument { argument: "title".into() });
        assert!(err.to_string().contains("[title]"));
    }

    #[test]
    fn test_instantiate_type_mismatch() {
        let intro = book_introspection();
        let err = intro
            .instantiate(&[json!("Dune"), json!("many"), Value::Null])
            .unwrap_err();
        assert_eq!(
            err,
            InstantiationError::InvalidArgument { value: json!("many"), argument: "Int pages".into() }
        );
        assert!(err.to_string().contains("many"));
        assert!(err.to_string().contains("Int pages"));
    }

    #[test]
    fn test_instantiate_without_constructor() {
        let intro = BeanIntrospection::<Book>::builder(0).build();
        let err = intro.instantiate(&[]).unwrap_err();
        assert!(matches!(err, InstantiationError::Failed { .. }));
    }

    #[test]
    fn test_equality_by_type() {
        let a = book_introspection();
        let b = BeanIntrospection::<Book>::builder(0).build();
        let other = BeanIntrospection::<Shelf>::builder(0).build();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(a != other);
        assert_eq!(a.to_string(), format!("BeanIntrospection{{type={}}}", a.bean_type()));
    }
}
