//! Core resolution pipeline: merge loaded layers and populate a typed config.
//!
//! Operates on pre-loaded flat maps (`ResolveInput`) with no I/O, making the
//! whole pipeline testable with synthetic inputs. Steps:
//!
//! 1. Strip the key prefix from each layer
//! 2. Merge layers (later overrides earlier)
//! 3. Build the key tree
//! 4. Populate the target

use crate::error::KvfigError;
use crate::merge::merge_layers;
use crate::populate::populate_from_tree;
use crate::schema::Schema;
use crate::source::{FlatMap, strip_prefix};
use crate::tree::KeyTree;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
pub struct ResolveInput {
    /// Flat maps in precedence order: first = lowest priority, last = highest.
    pub layers: Vec<FlatMap>,
    /// Common key prefix removed before population. Keys without it are dropped.
    pub prefix: Option<String>,
    /// Path separator used for merging and tree building.
    pub separator: char,
}

/// Strip and merge all layers into one flat map.
pub fn merged_map(input: ResolveInput) -> FlatMap {
    let mut merged = FlatMap::new();
    for layer in input.layers {
        let layer = match &input.prefix {
            Some(prefix) => strip_prefix(prefix, layer),
            None => layer,
        };
        merged = merge_layers(merged, layer, input.separator);
    }
    merged
}

/// Build the key tree for the merged layers.
pub fn build_tree(input: ResolveInput) -> KeyTree {
    let separator = input.separator;
    let mut tree = KeyTree::with_separator(separator);
    tree.extend(merged_map(input));
    tree
}

/// Resolve `input` into `target`.
pub fn resolve_into<C: Schema>(input: ResolveInput, target: &mut C) -> Result<(), KvfigError> {
    let tree = build_tree(input);
    populate_from_tree(&tree, target)
}

/// Resolve `input` into a fresh `C::default()`.
pub fn resolve<C: Schema + Default>(input: ResolveInput) -> Result<C, KvfigError> {
    let mut config = C::default();
    resolve_into(input, &mut config)?;
    Ok(config)
}
