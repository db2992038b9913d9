//! Bind flat key/value configuration onto typed Rust structs.
//!
//! Hierarchical config stores (Consul KV, etcd and friends) hand back a flat
//! listing of `/`-delimited keys:
//!
//! ```text
//! service1/username = u1
//! service1/password = p1
//! refresh           = true
//! items             = ["a","b"]
//! ```
//!
//! Kvfig folds that listing into a [`KeyTree`] and populates a struct from
//! it, field by field, following a [`Schema`] the struct declares for itself.
//!
//! ```
//! use kvfig::{Field, Schema, populate_from_map};
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
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     service1: Auth,
//!     log_file: String,
//!     refresh: bool,
//!     items: Vec<String>,
//! }
//!
//! impl Schema for Config {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             Field::nested("service1", |c| &mut c.service1),
//!             Field::string("logfile,/var/app/log/logfile.log", |c| &mut c.log_file),
//!             Field::boolean("refresh", |c| &mut c.refresh),
//!             Field::sequence("items", |c| &mut c.items),
//!         ]
//!     }
//! }
//!
//! let mut config = Config::default();
//! populate_from_map(
//!     [
//!         ("service1/username", "u1"),
//!         ("service1/password", "p1"),
//!         ("refresh", "true"),
//!         ("items", r#"["a","b"]"#),
//!     ],
//!     &mut config,
//! )?;
//!
//! assert_eq!(config.service1.username, "u1");
//! assert_eq!(config.log_file, "/var/app/log/logfile.log");
//! assert!(config.refresh);
//! assert_eq!(config.items, ["a", "b"]);
//! # Ok::<(), kvfig::KvfigError>(())
//! ```
//!
//! # Field annotations
//!
//! Each field is declared with an annotation `path` or `path,default`. The
//! path is a single segment resolved against the struct's own subtree, so a
//! nested struct's fields are relative to the parent field's path. Defaults
//! only apply to string fields.
//!
//! # Coercion
//!
//! | Field | Stored as | When missing or malformed |
//! |-------|-----------|---------------------------|
//! | `String` | verbatim | default if declared, else unchanged |
//! | `i32`, `i64` | base-10 integer | unchanged |
//! | `f64` | decimal float | unchanged |
//! | `bool` | `true`, `1`, `F`, ... | `false` |
//! | `Vec<String>` | JSON array of strings | unchanged |
//! | `HashMap<String, String>` | JSON object | unchanged |
//! | nested struct | subtree | unchanged |
//!
//! Population is best effort: a partially available store never aborts it.
//! The only error is [`KvfigError::InvalidTarget`], for targets that are not
//! structured records (see [`populate_target`]).
//!
//! # Tree shape conflicts
//!
//! A path is either a leaf or a branch. If the listing contains both `a` and
//! `a/b`, the branch wins: `a/b` is kept and the leaf `a` is dropped. Trees
//! are built deepest keys first, so the outcome does not depend on the order
//! keys arrive in. When layering sources, the higher-priority layer decides
//! the shape of a path instead (see [`merge_layers`]).
//!
//! ```
//! use kvfig::KeyTree;
//!
//! let tree = KeyTree::from_map([("a", "leaf"), ("a/b", "deep")]);
//! assert_eq!(tree.get_string("a"), None);
//! assert_eq!(tree.sub_tree("a").and_then(|a| a.get_string("b")), Some("deep"));
//! ```
//!
//! # Sources and layering
//!
//! [`Kvfig::builder`] loads one or more [`KvSource`]s, strips a common key
//! prefix, merges them (later sources win) and populates the result:
//!
//! ```no_run
//! # use kvfig::{Field, Schema, Kvfig};
//! # #[derive(Default)] struct AppConfig { port: i32 }
//! # impl Schema for AppConfig {
//! #     fn fields() -> Vec<Field<Self>> { vec![Field::int32("port", |c| &mut c.port)] }
//! # }
//! let config: AppConfig = Kvfig::builder()
//!     .prefix("config/myapp/")
//!     .file("/etc/myapp/defaults.toml")
//!     .env("MYAPP")
//!     .load()?;
//! # Ok::<(), kvfig::KvfigError>(())
//! ```
//!
//! A remote store client plugs in by implementing [`KvSource`].

pub mod error;

mod builder;
mod coerce;
mod file;
mod merge;
mod populate;
mod resolve;
mod schema;
mod source;
mod tree;

#[cfg(test)]
mod fixtures;

pub use builder::{Kvfig, KvfigBuilder};
pub use coerce::{decode_mapping, decode_sequence, parse_bool};
pub use error::KvfigError;
pub use file::FileSource;
pub use merge::merge_layers;
pub use populate::{Populate, populate_from_map, populate_from_tree, populate_target};
pub use schema::{Field, FieldInfo, FieldType, Schema, describe, parse_annotation};
pub use source::{EnvSource, FlatMap, KvSource, MapSource, strip_prefix};
pub use tree::{KeyTree, Node, SEPARATOR};
