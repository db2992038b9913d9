//! Hierarchical view over flat, separator-delimited keys.
//!
//! A flat listing such as `service1/username = u1` is folded into nested
//! branches so that a nested config section can be resolved against its own
//! namespace. Every node is either a [`Node::Leaf`] or a [`Node::Branch`],
//! never both. When two keys disagree about the shape of a path (`a = x` and
//! `a/b = y`), the branch wins and the leaf write is dropped. Bulk builds
//! insert deeper keys first so this holds whatever order the keys arrive in;
//! single [`insert`](KeyTree::insert) calls keep whichever shape came first.

use std::collections::BTreeMap;

use serde::Serialize;

/// Default path separator for keys.
pub const SEPARATOR: char = '/';

/// A node in a [`KeyTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Branch(KeyTree),
}

/// A tree built from flat delimited keys.
///
/// Sub-trees returned by [`sub_tree`](KeyTree::sub_tree) borrow the nodes of
/// their parent, so descending is free.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyTree {
    #[serde(skip)]
    separator: char,
    nodes: BTreeMap<String, Node>,
}

impl Default for KeyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTree {
    /// An empty tree using the default `/` separator.
    pub fn new() -> Self {
        Self::with_separator(SEPARATOR)
    }

    /// An empty tree splitting keys on `separator`.
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            nodes: BTreeMap::new(),
        }
    }

    /// Build a tree from flat `(key, value)` pairs using the default separator.
    pub fn from_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut tree = Self::new();
        tree.extend(pairs);
        tree
    }

    /// Insert every pair, deepest keys first.
    ///
    /// Keys with the same depth keep their iteration order, so the first of
    /// two keys naming the same path wins.
    pub fn extend<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let separator = self.separator;
        let mut pairs: Vec<(K, V)> = pairs.into_iter().collect();
        pairs.sort_by_cached_key(|(key, _)| {
            std::cmp::Reverse(split_path(key.as_ref(), separator).len())
        });
        for (key, value) in pairs {
            self.insert(key.as_ref(), value);
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Insert a single flat key.
    ///
    /// Returns `false` when the write was discarded because it conflicts with
    /// the shape already recorded for the path, or when the key has no
    /// non-empty segment.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> bool {
        let segments = split_path(key, self.separator);
        let Some((last, parents)) = segments.split_last() else {
            tracing::debug!(key, "ignoring key without path segments");
            return false;
        };

        let separator = self.separator;
        let mut current = self;
        for segment in parents {
            let node = current
                .nodes
                .entry((*segment).to_string())
                .or_insert_with(|| Node::Branch(KeyTree::with_separator(separator)));
            match node {
                Node::Branch(sub) => current = sub,
                Node::Leaf(_) => {
                    tracing::debug!(key, segment, "discarding key: intermediate segment is a leaf");
                    return false;
                }
            }
        }

        if let Some(existing) = current.nodes.get(*last) {
            match existing {
                Node::Branch(_) => {
                    tracing::debug!(key, "discarding leaf write: path is already a branch");
                }
                Node::Leaf(_) => {
                    tracing::debug!(key, "discarding duplicate leaf write");
                }
            }
            return false;
        }
        current
            .nodes
            .insert((*last).to_string(), Node::Leaf(value.into()));
        true
    }

    /// The leaf value stored directly under `segment`.
    ///
    /// `None` when the segment is absent or holds a branch.
    pub fn get_string(&self, segment: &str) -> Option<&str> {
        match self.nodes.get(segment)? {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    /// The branch stored directly under `segment`, viewed as a tree.
    ///
    /// `None` when the segment is absent or holds a leaf.
    pub fn sub_tree(&self, segment: &str) -> Option<&KeyTree> {
        match self.nodes.get(segment)? {
            Node::Branch(sub) => Some(sub),
            Node::Leaf(_) => None,
        }
    }

    /// Walk `segments` through branches and return the leaf at the last one.
    ///
    /// Equivalent to chaining [`sub_tree`](Self::sub_tree) for every segment
    /// but the last, then [`get_string`](Self::get_string) on the last.
    pub fn get_at_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&str> {
        let (last, parents) = segments.split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.sub_tree(segment.as_ref())?;
        }
        current.get_string(last.as_ref())
    }

    /// Like [`get_at_path`](Self::get_at_path), splitting a delimited path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.get_at_path(split_path(path, self.separator).as_slice())
    }

    /// The raw node under `segment`.
    pub fn node(&self, segment: &str) -> Option<&Node> {
        self.nodes.get(segment)
    }

    /// Child segments and their nodes, in segment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Split `key` on `separator`, dropping empty segments.
pub fn split_path(key: &str, separator: char) -> Vec<&str> {
    key.split(separator).filter(|s| !s.is_empty()).collect()
}
