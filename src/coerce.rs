//! String coercion rules for each semantic field type.
//!
//! Every function returns `None` when the stored string does not have the
//! expected shape. The populator decides what a failed coercion means for the
//! field; nothing here raises.

use std::collections::HashMap;

use serde_json::Value;

pub fn parse_i32(s: &str) -> Option<i32> {
    s.parse().ok()
}

pub fn parse_i64(s: &str) -> Option<i64> {
    s.parse().ok()
}

pub fn parse_f64(s: &str) -> Option<f64> {
    s.parse().ok()
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`. Mixed casing such as
/// `tRuE` is rejected.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Decode a JSON array of strings.
pub fn decode_sequence(s: &str) -> Option<Vec<String>> {
    serde_json::from_str(s).ok()
}

/// Decode a JSON object into a string map.
///
/// String values are kept verbatim; any other value is rendered as its JSON
/// text (`1`, `true`, `null`, `[1,2]`).
pub fn decode_mapping(s: &str) -> Option<HashMap<String, String>> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(s).ok()?;
    Some(
        object
            .into_iter()
            .map(|(key, value)| (key, stringify(value)))
            .collect(),
    )
}

/// Render a JSON value the way a leaf string would carry it.
pub(crate) fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_i32("42"), Some(42));
        assert_eq!(parse_i32("-5"), Some(-5));
        assert_eq!(parse_i32("+7"), Some(7));
        assert_eq!(parse_i32("3000000000"), None);
        assert_eq!(parse_i64("3000000000"), Some(3_000_000_000));
        assert_eq!(parse_i64("1.5"), None);
        assert_eq!(parse_i64(" 1"), None);
        assert_eq!(parse_i64(""), None);
    }

    #[test]
    fn floats() {
        assert_eq!(parse_f64("1.5"), Some(1.5));
        assert_eq!(parse_f64("-2"), Some(-2.0));
        assert_eq!(parse_f64("1e3"), Some(1000.0));
        assert_eq!(parse_f64("abc"), None);
    }

    #[test]
    fn bool_literals() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        for s in ["", "yes", "tRuE", "notabool", " true"] {
            assert_eq!(parse_bool(s), None, "{s}");
        }
    }

    #[test]
    fn sequence_of_strings() {
        assert_eq!(
            decode_sequence(r#"["a","b"]"#),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(decode_sequence("[]"), Some(vec![]));
    }

    #[test]
    fn sequence_rejects_other_shapes() {
        assert_eq!(decode_sequence("[1,2]"), None);
        assert_eq!(decode_sequence(r#"{"a":"b"}"#), None);
        assert_eq!(decode_sequence("a,b"), None);
    }

    #[test]
    fn mapping_keeps_strings() {
        let m = decode_mapping(r#"{"foo": "bar", "baz": "quux"}"#).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m["foo"], "bar");
        assert_eq!(m["baz"], "quux");
    }

    #[test]
    fn mapping_stringifies_non_strings() {
        let m = decode_mapping(r#"{"n": 1, "f": 1.5, "b": true, "z": null, "l": [1,2]}"#).unwrap();
        assert_eq!(m["n"], "1");
        assert_eq!(m["f"], "1.5");
        assert_eq!(m["b"], "true");
        assert_eq!(m["z"], "null");
        assert_eq!(m["l"], "[1,2]");
    }

    #[test]
    fn mapping_rejects_non_objects() {
        assert_eq!(decode_mapping(r#"["a"]"#), None);
        assert_eq!(decode_mapping("null"), None);
        assert_eq!(decode_mapping("{broken"), None);
    }
}
