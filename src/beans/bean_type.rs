//! Bean type identity.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of an introspected type.
///
/// Equality and hashing use only the `TypeId`; the name is for display
/// and registry keys.
#[derive(Debug, Clone, Copy)]
pub struct BeanType {
    id: TypeId,
    name: &'static str,
}

impl BeanType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Unqualified name, e.g. `Person` for `my_app::model::Person`.
    pub fn simple_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for BeanType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BeanType {}

impl Hash for BeanType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
