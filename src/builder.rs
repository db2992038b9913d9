use std::marker::PhantomData;
use std::path::PathBuf;

use crate::error::KvfigError;
use crate::file::FileSource;
use crate::resolve::{self, ResolveInput};
use crate::schema::Schema;
use crate::source::{EnvSource, FlatMap, KvSource, MapSource, rejoin_keys};
use crate::tree::{KeyTree, SEPARATOR};

/// Entry point for building a kvfig configuration.
pub struct Kvfig;

impl Kvfig {
    pub fn builder<C: Schema>() -> KvfigBuilder<C> {
        KvfigBuilder::new()
    }
}

/// Builder for loading a typed config from one or more key/value sources.
///
/// Sources are listed in **priority-ascending** order: the last one added has
/// the highest priority. Each source is loaded, its keys are stripped of the
/// [`prefix`](Self::prefix), and the layers are merged before population.
pub struct KvfigBuilder<C: Schema> {
    prefix: Option<String>,
    separator: char,
    sources: Vec<Box<dyn KvSource>>,
    _phantom: PhantomData<C>,
}

impl<C: Schema> KvfigBuilder<C> {
    fn new() -> Self {
        Self {
            prefix: None,
            separator: SEPARATOR,
            sources: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Only keys starting with `prefix` are used, with the prefix removed
    /// (e.g. `"config/myapp/"`).
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Override the path separator (default: `/`).
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Add a source on top of the ones already added.
    pub fn source<S: KvSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Add literal pairs as a source.
    pub fn pairs<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.source(MapSource::new(pairs))
    }

    /// Add a TOML file as a source. A missing file is skipped.
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        self.source(FileSource::new(path))
    }

    /// Add `{PREFIX}__*` environment variables as a source.
    pub fn env(self, prefix: &str) -> Self {
        self.source(EnvSource::new(prefix))
    }

    fn load_layers(&self) -> Result<Vec<FlatMap>, KvfigError> {
        self.sources
            .iter()
            .map(|source| -> Result<FlatMap, KvfigError> {
                let mut layer = source.load()?;
                if let Some(from) = source.separator()
                    && from != self.separator
                {
                    layer = rejoin_keys(layer, from, self.separator);
                }
                tracing::debug!(source = %source.name(), keys = layer.len(), "loaded source");
                Ok(layer)
            })
            .collect()
    }

    fn resolve_input(&self) -> Result<ResolveInput, KvfigError> {
        Ok(ResolveInput {
            layers: self.load_layers()?,
            prefix: self.prefix.clone(),
            separator: self.separator,
        })
    }

    /// The merged flat map, after prefix stripping.
    pub fn flat_map(&self) -> Result<FlatMap, KvfigError> {
        Ok(resolve::merged_map(self.resolve_input()?))
    }

    /// The key tree built from the merged flat map.
    pub fn tree(&self) -> Result<KeyTree, KvfigError> {
        Ok(resolve::build_tree(self.resolve_input()?))
    }

    /// Populate an existing value. Fields with no matching key keep their
    /// current values, except booleans which fall back to `false`.
    pub fn load_into(&self, target: &mut C) -> Result<(), KvfigError> {
        resolve::resolve_into(self.resolve_input()?, target)
    }

    /// Load sources and populate a fresh `C::default()`.
    pub fn load(&self) -> Result<C, KvfigError>
    where
        C: Default,
    {
        resolve::resolve(self.resolve_input()?)
    }
}
