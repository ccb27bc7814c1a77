//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use beanroute::annotation::{AnnotationMetadata, NULLABLE, VALUE_MEMBER};
use beanroute::beans::{BeanIntrospection, BeanProperty, InstantiationError, IntrospectionReference};
use beanroute::convert::{ConversionService, DefaultConversionService};
use beanroute::{Argument, TypeTag, Value};

/// A bean as generated code would see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub nickname: Option<String>,
}

/// Builds the introspection generated code would emit for `Person`.
pub fn person_introspection() -> BeanIntrospection<Person> {
    let mut builder = BeanIntrospection::<Person>::builder(3);
    builder
        .annotation_metadata(AnnotationMetadata::new().with_annotation("Introspected"))
        .add_property(
            BeanProperty::<Person>::new("name", TypeTag::String)
                .with_annotation_metadata(AnnotationMetadata::new().with_value("Column", VALUE_MEMBER, "full_name"))
                .reader(|p| Value::from(p.name.clone()))
                .writer(|p, v| p.name = v.as_str().unwrap_or_default().to_string()),
        )
        .add_property(
            BeanProperty::<Person>::new("age", TypeTag::Int)
                .reader(|p| Value::from(p.age))
                .writer(|p, v| p.age = v.as_i64().unwrap_or_default()),
        )
        .add_property(
            BeanProperty::<Person>::new("nickname", TypeTag::String)
                .with_annotation_metadata(AnnotationMetadata::new().with_annotation(NULLABLE))
                .reader(|p| p.nickname.clone().map(Value::from).unwrap_or(Value::Null)),
        )
        .constructor_arguments(vec![
            Argument::new("name", TypeTag::String),
            Argument::new("age", TypeTag::Int),
            Argument::new("nickname", TypeTag::String).nullable(),
        ])
        .instantiator(|args| {
            let name = args[0].as_str().ok_or_else(|| InstantiationError::Failed {
                bean: "Person".into(),
                reason: "name is not a string".into(),
            })?;
            Ok(Person {
                name: name.to_string(),
                age: args[1].as_i64().unwrap_or_default(),
                nickname: args[2].as_str().map(str::to_string),
            })
        });
    builder
        .index_property_value("Column", "name", "full_name")
        .expect("name registered");
    builder.index_property("Column", "age").expect("age registered");
    builder.build()
}

/// A soft reference to the `Person` introspection.
pub fn person_reference() -> IntrospectionReference<Person> {
    IntrospectionReference::new(|| Ok(person_introspection()))
}

pub fn conversion_service() -> Arc<dyn ConversionService> {
    Arc::new(DefaultConversionService::new())
}
