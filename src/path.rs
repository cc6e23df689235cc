use serde_json::{Map, Value};

/// =========================
/// Dotted-path assignment
/// =========================

/// Assign `value` at `path` inside `root`, creating intermediate objects.
/// `"a.b"` produces `{"a":{"b":value}}`, never a literal `"a.b"` key.
/// A scalar sitting at a prefix segment is overwritten with a fresh object
/// (last writer wins, no error).
pub fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(next) = slot {
                set_path(next, rest, value);
            } else {
                // scalar at a prefix segment: replace it with the nested
                // object built from the remaining path
                let mut next = Map::new();
                set_path(&mut next, rest, value);
                *slot = Value::Object(next);
            }
        }
    }
}

/// Apply every entry of `defaults` via [`set_path`], in the defaults' own
/// insertion order. Later conflicting entries deterministically overwrite
/// earlier ones at the same path.
pub fn merge_defaults(root: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, value) in defaults {
        set_path(root, key, value.clone());
    }
}

/// Shallow defaulted merge: insert only top-level keys absent from `root`.
/// Existing keys win; `fallback` supplies fallback values, never overrides.
pub fn apply_under(root: &mut Map<String, Value>, fallback: Map<String, Value>) {
    for (key, value) in fallback {
        root.entry(key).or_insert(value);
    }
}

/// Nested lookup along a dotted path. Returns None if any segment is missing
/// or a non-object is hit before the terminal segment.
pub fn get_path<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for seg in segments {
        current = current.as_object()?.get(seg)?;
    }
    Some(current)
}
