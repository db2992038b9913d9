//! TOML files as a local stand-in for the remote store.
//!
//! Section tables become path segments and everything written as a value is
//! a leaf, so
//!
//! ```toml
//! refresh = true
//! items = ["a", "b"]
//!
//! [foo]
//! headers = { accept = "json" }
//! ```
//!
//! lists as `refresh = "true"`, `items = "[\"a\",\"b\"]"` and
//! `foo/headers = "{\"accept\":\"json\"}"`. Strings are kept verbatim,
//! other scalars use their textual form, and arrays and inline tables are
//! encoded as JSON so that sequence and mapping fields decode them the same
//! way as values from the store. Dotted keys (`a.b = 1`) are paths, like
//! section headers.
//!
//! The document is read with `toml_edit`, which keeps the distinction
//! between `[section]` tables and `{ inline }` tables that plain
//! deserialization loses.
//!
//! A missing file lists nothing. Only real I/O errors and parse errors are
//! reported.

use std::path::{Path, PathBuf};

use serde_json::json;
use toml_edit::{DocumentMut, InlineTable, Item, Table, Value};

use crate::error::KvfigError;
use crate::source::{FlatMap, KvSource};
use crate::tree::SEPARATOR;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `file_name` inside the platform config directory for `app_name`
    /// (e.g. `~/.config/{app_name}/` on Linux).
    ///
    /// Returns `None` if the platform directory cannot be determined.
    pub fn platform(app_name: &str, file_name: &str) -> Option<Self> {
        let proj = directories::ProjectDirs::from("", "", app_name)?;
        Some(Self::new(proj.config_dir().join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<FlatMap, KvfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "config file not found, skipping");
                return Ok(FlatMap::new());
            }
            Err(e) => {
                return Err(KvfigError::IoError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let doc: DocumentMut = content.parse().map_err(|e| KvfigError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;
        let mut out = FlatMap::new();
        flatten_table(doc.as_table(), "", &mut out);
        Ok(out)
    }

    fn separator(&self) -> Option<char> {
        Some(SEPARATOR)
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}

/// Flatten a TOML table into `/`-delimited keys.
pub fn flatten_table(table: &Table, prefix: &str, out: &mut FlatMap) {
    for (key, item) in table.iter() {
        let path = join(prefix, key);
        match item {
            Item::None => {}
            Item::Table(sub) => flatten_table(sub, &path, out),
            Item::Value(Value::InlineTable(inline)) if inline.is_dotted() => {
                flatten_dotted(inline, &path, out);
            }
            Item::Value(value) => {
                out.insert(path, leaf_text(value));
            }
            Item::ArrayOfTables(tables) => {
                let array = tables.iter().map(table_to_json).collect();
                out.insert(path, serde_json::Value::Array(array).to_string());
            }
        }
    }
}

fn flatten_dotted(inline: &InlineTable, prefix: &str, out: &mut FlatMap) {
    for (key, value) in inline.iter() {
        let path = join(prefix, key);
        match value {
            Value::InlineTable(sub) if sub.is_dotted() => flatten_dotted(sub, &path, out),
            other => {
                out.insert(path, leaf_text(other));
            }
        }
    }
}

/// The string a leaf carries for `value`.
fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.value().clone(),
        Value::Integer(i) => i.value().to_string(),
        Value::Float(f) => f.value().to_string(),
        Value::Boolean(b) => b.value().to_string(),
        Value::Datetime(dt) => dt.value().to_string(),
        Value::Array(_) | Value::InlineTable(_) => value_to_json(value).to_string(),
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s.value()),
        Value::Integer(i) => json!(i.value()),
        Value::Float(f) => json!(f.value()),
        Value::Boolean(b) => json!(b.value()),
        Value::Datetime(dt) => json!(dt.value().to_string()),
        Value::Array(array) => array.iter().map(value_to_json).collect(),
        Value::InlineTable(inline) => inline
            .iter()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect::<serde_json::Map<_, _>>()
            .into(),
    }
}

fn item_to_json(item: &Item) -> serde_json::Value {
    match item {
        Item::None => serde_json::Value::Null,
        Item::Value(value) => value_to_json(value),
        Item::Table(table) => table_to_json(table),
        Item::ArrayOfTables(tables) => tables.iter().map(table_to_json).collect(),
    }
}

fn table_to_json(table: &Table) -> serde_json::Value {
    table
        .iter()
        .map(|(k, item)| (k.to_string(), item_to_json(item)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn flatten(toml_str: &str) -> FlatMap {
        let doc: DocumentMut = toml_str.parse().unwrap();
        let mut out = FlatMap::new();
        flatten_table(doc.as_table(), "", &mut out);
        out
    }

    #[test]
    fn scalars_become_text() {
        let map = flatten(
            r#"
            name = "app"
            port = 8080
            ratio = 0.5
            refresh = true
            "#,
        );
        assert_eq!(map["name"], "app");
        assert_eq!(map["port"], "8080");
        assert_eq!(map["ratio"], "0.5");
        assert_eq!(map["refresh"], "true");
    }

    #[test]
    fn tables_become_paths() {
        let map = flatten(
            r#"
            [service1]
            username = "u1"
            [a.b]
            c = "deep"
            "#,
        );
        assert_eq!(map["service1/username"], "u1");
        assert_eq!(map["a/b/c"], "deep");
    }

    #[test]
    fn arrays_become_json() {
        let map = flatten(r#"items = ["a", "b"]"#);
        assert_eq!(map["items"], r#"["a","b"]"#);
    }

    #[test]
    fn inline_tables_become_json() {
        let map = flatten(
            r#"
            [foo]
            headers = { foo = "bar", n = 1 }
            "#,
        );
        assert_eq!(map.len(), 1);
        let decoded: serde_json::Value = serde_json::from_str(&map["foo/headers"]).unwrap();
        assert_eq!(decoded, json!({"foo": "bar", "n": 1}));
    }

    #[test]
    fn inline_table_decodes_as_mapping() {
        let map = flatten(r#"headers = { foo = "bar", baz = "quux" }"#);
        let headers = crate::coerce::decode_mapping(&map["headers"]).unwrap();
        assert_eq!(headers["foo"], "bar");
        assert_eq!(headers["baz"], "quux");
    }

    #[test]
    fn dotted_keys_become_paths() {
        let map = flatten(r#"service1.username = "u1""#);
        assert_eq!(map["service1/username"], "u1");
    }

    #[test]
    fn arrays_of_tables_become_json() {
        let map = flatten(
            r#"
            [[servers]]
            host = "a"
            [[servers]]
            host = "b"
            "#,
        );
        let decoded: serde_json::Value = serde_json::from_str(&map["servers"]).unwrap();
        assert_eq!(decoded, json!([{"host": "a"}, {"host": "b"}]));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path().join("absent.toml"));
        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "logfile = \"/tmp/x.log\"\n[foo]\nurl = \"http://x\"\n").unwrap();
        let map = FileSource::new(&path).load().unwrap();
        assert_eq!(map["logfile"], "/tmp/x.log");
        assert_eq!(map["foo/url"], "http://x");
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml =").unwrap();
        let err = FileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, KvfigError::ParseError { .. }));
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, KvfigError::IoError { .. }));
    }
}
