//! Bean property descriptors.
//!
//! # Responsibilities
//! - Describe one named, typed attribute of a bean
//! - Read and write the attribute through generated accessors
//!
//! # Design Decisions
//! - Accessors are plain `fn` pointers emitted by generated code
//! - Read/write capability is the presence of an accessor
//! - Writes are type checked against the declared `TypeTag`

use std::fmt;

use serde_json::Value;

use crate::annotation::{AnnotationMetadata, NULLABLE};
use crate::beans::bean_type::BeanType;
use crate::beans::error::{IntrospectionError, IntrospectionResult};
use crate::types::TypeTag;

/// Reads a property value from a bean.
pub type PropertyReader<T> = fn(&T) -> Value;

/// Writes an already type-checked value into a bean.
pub type PropertyWriter<T> = fn(&mut T, Value);

/// Metadata and accessors for a single bean property.
pub struct BeanProperty<T> {
    name: String,
    type_tag: TypeTag,
    bean_type: BeanType,
    annotation_metadata: AnnotationMetadata,
    reader: Option<PropertyReader<T>>,
    writer: Option<PropertyWriter<T>>,
}

impl<T: 'static> BeanProperty<T> {
    /// Create a property with neither reader nor writer.
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            bean_type: BeanType::of::<T>(),
            annotation_metadata: AnnotationMetadata::default(),
            reader: None,
            writer: None,
        }
    }
}

impl<T> BeanProperty<T> {
    pub fn reader(mut self, reader: PropertyReader<T>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn writer(mut self, writer: PropertyWriter<T>) -> Self {
        self.writer = Some(writer);
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

    /// The bean type declaring this property.
    pub fn declaring_type(&self) -> BeanType {
        self.bean_type
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }

    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    pub fn is_read_only(&self) -> bool {
        self.reader.is_some() && self.writer.is_none()
    }

    pub fn is_write_only(&self) -> bool {
        self.writer.is_some() && self.reader.is_none()
    }

    /// Read the property from `bean`.
    pub fn get(&self, bean: &T) -> IntrospectionResult<Value> {
        let reader = self
            .reader
            .ok_or_else(|| IntrospectionError::WriteOnly(self.name.clone()))?;
        Ok(reader(bean))
    }

    /// Write `value` into `bean`.
    ///
    /// Null is accepted only for properties annotated [`NULLABLE`].
    pub fn set(&self, bean: &mut T, value: Value) -> IntrospectionResult<()> {
        let writer = self
            .writer
            .ok_or_else(|| IntrospectionError::ReadOnly(self.name.clone()))?;

        let acceptable = if value.is_null() {
            self.annotation_metadata.has_annotation(NULLABLE)
        } else {
            self.type_tag.is_instance(&value)
        };
        if !acceptable {
            return Err(IntrospectionError::InvalidPropertyValue {
                value,
                property: self.to_string(),
            });
        }

        writer(bean, value);
        Ok(())
    }
}

impl<T> Clone for BeanProperty<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            type_tag: self.type_tag,
            bean_type: self.bean_type,
            annotation_metadata: self.annotation_metadata.clone(),
            reader: self.reader,
            writer: self.writer,
        }
    }
}

impl<T> fmt::Debug for BeanProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanProperty")
            .field("name", &self.name)
            .field("type", &self.type_tag)
            .field("bean", &self.bean_type.name())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

impl<T> fmt::Display for BeanProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.type_tag, self.bean_type.simple_name(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Account {
        owner: String,
        balance: i64,
        memo: Option<String>,
    }

    fn owner() -> BeanProperty<Account> {
        BeanProperty::<Account>::new("owner", TypeTag::String)
            .reader(|a| Value::from(a.owner.clone()))
            .writer(|a, v| a.owner = v.as_str().unwrap_or_default().to_string())
    }

    #[test]
    fn test_read_write() {
        let prop = owner();
        let mut account = Account::default();

        prop.set(&mut account, json!("ada")).unwrap();
        assert_eq!(account.owner, "ada");
        assert_eq!(prop.get(&account).unwrap(), json!("ada"));
        assert!(prop.is_readable() && prop.is_writable());
        assert!(!prop.is_read_only() && !prop.is_write_only());
    }

    #[test]
    fn test_type_checked_write() {
        let prop = owner();
        let mut account = Account::default();

        let err = prop.set(&mut account, json!(12)).unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidPropertyValue { .. }));
        assert!(err.to_string().contains("String Account.owner"));

        let err = prop.set(&mut account, Value::Null).unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidPropertyValue { .. }));
        assert_eq!(account.owner, "");
    }

    #[test]
    fn test_nullable_write() {
        let prop = BeanProperty::<Account>::new("memo", TypeTag::String)
            .with_annotation_metadata(AnnotationMetadata::new().with_annotation(NULLABLE))
            .writer(|a, v| a.memo = v.as_str().map(str::to_string));
        let mut account = Account { memo: Some("x".into()), ..Default::default() };

        prop.set(&mut account, Value::Null).unwrap();
        assert_eq!(account.memo, None);
    }

    #[test]
    fn test_capabilities() {
        let read_only =
            BeanProperty::<Account>::new("balance", TypeTag::Int).reader(|a| Value::from(a.balance));
        let mut account = Account { balance: 10, ..Default::default() };

        assert!(read_only.is_read_only());
        assert_eq!(read_only.get(&account).unwrap(), json!(10));
        assert!(matches!(
            read_only.set(&mut account, json!(5)),
            Err(IntrospectionError::ReadOnly(name)) if name == "balance"
        ));

        let write_only =
            BeanProperty::<Account>::new("balance", TypeTag::Int).writer(|a, v| a.balance = v.as_i64().unwrap_or(0));
        assert!(write_only.is_write_only());
        assert!(matches!(write_only.get(&account), Err(IntrospectionError::WriteOnly(_))));
        assert_eq!(write_only.declaring_type(), BeanType::of::<Account>());
    }
}
