//! Field descriptors: how a config struct tells the populator where each of
//! its fields lives and what shape it has.
//!
//! A type opts in by implementing [`Schema`] and listing one [`Field`] per
//! member, in declaration order:
//!
//! ```
//! use kvfig::{Field, Schema};
//!
//! #[derive(Debug, Default)]
//! struct Auth {
//!     username: String,
//!     password: String,
//! }
//!
//! impl Schema for Auth {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             Field::string("username", |a| &mut a.username),
//!             Field::string("password", |a| &mut a.password),
//!         ]
//!     }
//! }
//! ```
//!
//! Each constructor takes an annotation of the form `path` or `path,default`
//! and an accessor returning the field's slot. Defaults only apply to string
//! fields.

use std::collections::HashMap;

use crate::error::KvfigError;
use crate::tree::KeyTree;

/// A type whose fields can be populated from a [`KeyTree`].
pub trait Schema: Sized {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<Field<Self>>;
}

/// The semantic type of a field, which selects its lookup and coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int32,
    Int64,
    Float64,
    Bool,
    Nested,
    StringSequence,
    StringMap,
}

/// Handler for nested fields: receives the target and the nested subtree.
pub(crate) type NestedFn<T> = Box<dyn Fn(&mut T, &KeyTree) -> Result<(), KvfigError>>;

pub(crate) enum Slot<T> {
    String(fn(&mut T) -> &mut String),
    Int32(fn(&mut T) -> &mut i32),
    Int64(fn(&mut T) -> &mut i64),
    Float64(fn(&mut T) -> &mut f64),
    Bool(fn(&mut T) -> &mut bool),
    Nested(NestedFn<T>),
    StringSequence(fn(&mut T) -> &mut Vec<String>),
    StringMap(fn(&mut T) -> &mut HashMap<String, String>),
}

/// Describes one field of `T`: its path, optional default and slot.
pub struct Field<T> {
    path: String,
    default: Option<String>,
    pub(crate) slot: Slot<T>,
}

impl<T> Field<T> {
    fn new(annotation: &str, slot: Slot<T>) -> Self {
        let (path, default) = parse_annotation(annotation);
        let default = match slot {
            Slot::String(_) => default,
            _ => None,
        };
        Self {
            path,
            default,
            slot,
        }
    }

    pub fn string(annotation: &str, accessor: fn(&mut T) -> &mut String) -> Self {
        Self::new(annotation, Slot::String(accessor))
    }

    pub fn int32(annotation: &str, accessor: fn(&mut T) -> &mut i32) -> Self {
        Self::new(annotation, Slot::Int32(accessor))
    }

    pub fn int64(annotation: &str, accessor: fn(&mut T) -> &mut i64) -> Self {
        Self::new(annotation, Slot::Int64(accessor))
    }

    pub fn float64(annotation: &str, accessor: fn(&mut T) -> &mut f64) -> Self {
        Self::new(annotation, Slot::Float64(accessor))
    }

    pub fn boolean(annotation: &str, accessor: fn(&mut T) -> &mut bool) -> Self {
        Self::new(annotation, Slot::Bool(accessor))
    }

    /// A list of strings stored as a JSON array.
    pub fn sequence(annotation: &str, accessor: fn(&mut T) -> &mut Vec<String>) -> Self {
        Self::new(annotation, Slot::StringSequence(accessor))
    }

    /// A string map stored as a JSON object.
    pub fn mapping(
        annotation: &str,
        accessor: fn(&mut T) -> &mut HashMap<String, String>,
    ) -> Self {
        Self::new(annotation, Slot::StringMap(accessor))
    }

    /// A nested struct resolved against the subtree at the field's path.
    pub fn nested<U>(annotation: &str, accessor: fn(&mut T) -> &mut U) -> Self
    where
        T: 'static,
        U: Schema + Default + 'static,
    {
        let handler: NestedFn<T> = Box::new(
            move |target: &mut T, subtree: &KeyTree| -> Result<(), KvfigError> {
                let mut nested = U::default();
                crate::populate::populate_from_tree(subtree, &mut nested)?;
                *accessor(target) = nested;
                Ok(())
            },
        );
        Self::new(annotation, Slot::Nested(handler))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared default. Always `None` for non-string fields.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn field_type(&self) -> FieldType {
        match self.slot {
            Slot::String(_) => FieldType::String,
            Slot::Int32(_) => FieldType::Int32,
            Slot::Int64(_) => FieldType::Int64,
            Slot::Float64(_) => FieldType::Float64,
            Slot::Bool(_) => FieldType::Bool,
            Slot::Nested(_) => FieldType::Nested,
            Slot::StringSequence(_) => FieldType::StringSequence,
            Slot::StringMap(_) => FieldType::StringMap,
        }
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("path", &self.path)
            .field("default", &self.default)
            .field("type", &self.field_type())
            .finish()
    }
}

/// A type-erased view of one descriptor, as returned by [`describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub path: String,
    pub default: Option<String>,
    pub field_type: FieldType,
}

/// List the descriptors of `T` without populating anything.
pub fn describe<T: Schema>() -> Vec<FieldInfo> {
    T::fields()
        .iter()
        .map(|field| FieldInfo {
            path: field.path.clone(),
            default: field.default.clone(),
            field_type: field.field_type(),
        })
        .collect()
}

/// Split an annotation into its path and default.
///
/// Only an annotation with exactly one comma carries a default; an empty
/// default counts as none. Anything else is taken whole as the path.
pub fn parse_annotation(annotation: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = annotation.split(',').collect();
    match parts.as_slice() {
        [path, default] if !default.is_empty() => {
            (path.to_string(), Some(default.to_string()))
        }
        [path, _] => (path.to_string(), None),
        _ => (annotation.to_string(), None),
    }
}
