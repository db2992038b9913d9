use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvfigError {
    #[error("Invalid target: {type_name} is not a structured record")]
    InvalidTarget { type_name: &'static str },

    #[error("Source '{name}' failed: {reason}")]
    Source { name: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl KvfigError {
    /// Whether this error came from the population step rather than a source.
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, KvfigError::InvalidTarget { .. })
    }
}
