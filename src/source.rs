//! Where flat key/value listings come from.
//!
//! The remote store client lives outside this crate: anything that can list
//! `key → string` pairs implements [`KvSource`]. Two in-crate sources cover
//! local use: [`MapSource`] for literal pairs and [`EnvSource`] for
//! environment variables. Config files are handled by
//! [`FileSource`](crate::file::FileSource).

use std::collections::BTreeMap;

use crate::error::KvfigError;
use crate::tree::{SEPARATOR, split_path};

/// A flat listing of full keys to string values.
pub type FlatMap = BTreeMap<String, String>;

/// Anything that can list flat key/value pairs.
///
/// Implementations may block (network, disk). Keys are returned as stored;
/// prefix stripping happens afterwards in the builder.
pub trait KvSource: Send + Sync {
    /// Human-readable name, used in errors and logs.
    fn name(&self) -> String;

    /// List every key/value pair this source holds.
    fn load(&self) -> Result<FlatMap, KvfigError>;

    /// The separator this source joins key segments with.
    ///
    /// `None` means the keys already use the caller's separator and are taken
    /// verbatim. Sources that build keys themselves return the separator they
    /// join with, and the builder re-joins their keys when it differs.
    fn separator(&self) -> Option<char> {
        None
    }
}

/// A fixed set of pairs held in memory.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    pairs: FlatMap,
}

impl MapSource {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KvSource for MapSource {
    fn name(&self) -> String {
        "map".into()
    }

    fn load(&self) -> Result<FlatMap, KvfigError> {
        Ok(self.pairs.clone())
    }
}

/// Environment variables matching `{PREFIX}__*`.
///
/// Double underscore `__` separates path segments; single `_` is literal.
/// Segments are lowercased, so `APP__SERVICE1__USER_NAME` maps to
/// `service1/user_name`. Values are kept verbatim.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Read from the process environment at load time.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            vars: None,
        }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn from_vars(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            prefix: prefix.to_string(),
            vars: Some(vars.into_iter().collect()),
        }
    }
}

impl KvSource for EnvSource {
    fn name(&self) -> String {
        format!("env:{}", self.prefix)
    }

    fn load(&self) -> Result<FlatMap, KvfigError> {
        Ok(match &self.vars {
            Some(vars) => env_to_flat(&self.prefix, vars.iter().cloned()),
            None => env_to_flat(&self.prefix, std::env::vars()),
        })
    }

    fn separator(&self) -> Option<char> {
        Some(SEPARATOR)
    }
}

/// Map `{prefix}__A__B` variables to `a/b` keys.
pub fn env_to_flat(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> FlatMap {
    let needle = format!("{prefix}__");
    let mut map = FlatMap::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let path = rest
            .split("__")
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("/");
        map.insert(path, value);
    }

    map
}

/// Re-join every key's segments with `to` instead of `from`.
///
/// Empty segments are dropped along the way.
pub fn rejoin_keys(map: FlatMap, from: char, to: char) -> FlatMap {
    let to = to.to_string();
    map.into_iter()
        .map(|(key, value)| (split_path(&key, from).join(to.as_str()), value))
        .collect()
}

/// Keep only keys starting with `prefix`, with the prefix removed.
///
/// An empty prefix keeps everything unchanged.
pub fn strip_prefix(prefix: &str, pairs: impl IntoIterator<Item = (String, String)>) -> FlatMap {
    pairs
        .into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix)
                .map(|rest| (rest.to_string(), value))
        })
        .collect()
}
