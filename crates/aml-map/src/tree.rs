//! Output tree construction.

use serde_json::{Map, Value};

/// Writes `value` at the slash-delimited `target` path.
///
/// Missing intermediate levels are created. An intermediate level that holds
/// a non-object is replaced by a fresh object.
pub fn put_deep(root: &mut Map<String, Value>, target: &str, value: Value) {
    let mut segments: Vec<&str> = target.split('/').collect();
    let Some(last) = segments.pop() else {
        return;
    };
    let mut node = root;
    for segment in segments {
        let slot = node
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        node = next;
    }
    node.insert(last.to_string(), value);
}
