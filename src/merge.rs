use crate::source::FlatMap;
use crate::tree::split_path;

/// Merge `overlay` on top of `base`, key by key.
///
/// Keys are compared by path segments, so `a//b` and `a/b` are the same key.
/// An overlay key also evicts base keys that would give its path a different
/// shape: setting `a` drops every `a/...` key from `base`, and setting `a/b`
/// drops a base leaf at `a`. Otherwise the tree built from the result would
/// keep the base's shape instead of the overlay's.
pub fn merge_layers(mut base: FlatMap, overlay: FlatMap, separator: char) -> FlatMap {
    for (key, value) in overlay {
        let segments = split_path(&key, separator);
        base.retain(|existing, _| {
            let existing = split_path(existing, separator);
            existing != segments && !shapes_conflict(&existing, &segments)
        });
        base.insert(key, value);
    }
    base
}

/// True when one path is a strict prefix of the other.
fn shapes_conflict(a: &[&str], b: &[&str]) -> bool {
    let shorter = a.len().min(b.len());
    a.len() != b.len() && a[..shorter] == b[..shorter]
}
