//! Type-directed population of a [`Schema`] target from a [`KeyTree`].
//!
//! Walks the target's descriptors in declaration order. Nested fields descend
//! into the subtree at their path, so their own paths resolve relative to the
//! parent's namespace. Every other field reads the leaf at its path and
//! coerces it:
//!
//! | Type | Missing or malformed value |
//! |------|----------------------------|
//! | nested | left unchanged |
//! | string | declared default if any, else unchanged |
//! | i32 / i64 / f64 | left unchanged |
//! | bool | set to `false` |
//! | sequence / mapping | left unchanged |
//!
//! Population never fails on data. The only error is
//! [`KvfigError::InvalidTarget`], raised by [`populate_target`] before any
//! field is touched.

use std::collections::HashMap;

use crate::coerce;
use crate::error::KvfigError;
use crate::schema::{Schema, Slot};
use crate::tree::KeyTree;

/// Populate `target` from a pre-built tree.
pub fn populate_from_tree<T: Schema>(tree: &KeyTree, target: &mut T) -> Result<(), KvfigError> {
    for field in T::fields() {
        let path = field.path();
        match &field.slot {
            Slot::Nested(handler) => {
                if let Some(subtree) = tree.sub_tree(path) {
                    handler(target, subtree)?;
                }
            }
            Slot::String(accessor) => match tree.get_string(path) {
                Some(value) => *accessor(target) = value.to_string(),
                None => {
                    if let Some(default) = field.default_value() {
                        *accessor(target) = default.to_string();
                    }
                }
            },
            Slot::Int32(accessor) => {
                assign(tree, path, coerce::parse_i32, accessor(target));
            }
            Slot::Int64(accessor) => {
                assign(tree, path, coerce::parse_i64, accessor(target));
            }
            Slot::Float64(accessor) => {
                assign(tree, path, coerce::parse_f64, accessor(target));
            }
            Slot::Bool(accessor) => {
                let slot = accessor(target);
                *slot = false;
                assign(tree, path, coerce::parse_bool, slot);
            }
            Slot::StringSequence(accessor) => {
                assign(tree, path, coerce::decode_sequence, accessor(target));
            }
            Slot::StringMap(accessor) => {
                assign(tree, path, coerce::decode_mapping, accessor(target));
            }
        }
    }
    Ok(())
}

/// Build a tree from flat pairs, then populate `target` from it.
pub fn populate_from_map<T, K, V>(
    pairs: impl IntoIterator<Item = (K, V)>,
    target: &mut T,
) -> Result<(), KvfigError>
where
    T: Schema,
    K: AsRef<str>,
    V: Into<String>,
{
    let tree = KeyTree::from_map(pairs);
    populate_from_tree(&tree, target)
}

/// Overwrite `slot` with the coerced leaf at `path`, if both exist.
fn assign<V>(tree: &KeyTree, path: &str, parse: fn(&str) -> Option<V>, slot: &mut V) {
    let Some(raw) = tree.get_string(path) else {
        return;
    };
    match parse(raw) {
        Some(value) => *slot = value,
        None => tracing::trace!(path, raw, "value does not coerce; leaving field unchanged"),
    }
}

/// A value that can be populated through a type-erased reference.
///
/// Implemented for every [`Schema`] type. Bare scalars, sequences and maps
/// also implement it, but reject population with
/// [`KvfigError::InvalidTarget`] since they have no fields to address.
pub trait Populate {
    fn populate(&mut self, tree: &KeyTree) -> Result<(), KvfigError>;
}

impl<T: Schema> Populate for T {
    fn populate(&mut self, tree: &KeyTree) -> Result<(), KvfigError> {
        populate_from_tree(tree, self)
    }
}

macro_rules! not_a_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Populate for $ty {
                fn populate(&mut self, _tree: &KeyTree) -> Result<(), KvfigError> {
                    Err(KvfigError::InvalidTarget {
                        type_name: std::any::type_name::<$ty>(),
                    })
                }
            }
        )*
    };
}

not_a_record!(
    String,
    i32,
    i64,
    f64,
    bool,
    Vec<String>,
    HashMap<String, String>,
);

/// Populate an optional, type-erased target.
///
/// A missing target fails with [`KvfigError::InvalidTarget`].
pub fn populate_target(
    tree: &KeyTree,
    target: Option<&mut dyn Populate>,
) -> Result<(), KvfigError> {
    match target {
        Some(target) => target.populate(tree),
        None => Err(KvfigError::InvalidTarget { type_name: "null" }),
    }
}
