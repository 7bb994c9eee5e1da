//! Path query execution.
//!
//! Queries run through `jsonpath_lib`. A definite path (one that can select
//! at most one node) resolves to that node; any other path resolves to the
//! array of everything it selected.

use serde_json::Value;
use tracing::debug;

/// Executes `path` against `payload`, returning null when nothing matched
/// or the path could not be parsed.
pub fn select(payload: &Value, path: &str) -> Value {
    find(payload, path).unwrap_or(Value::Null)
}

/// Executes `path` against `payload`.
///
/// Returns `None` when the path is invalid or a definite path matched
/// nothing. Indefinite paths always return an array, possibly empty.
pub fn find(payload: &Value, path: &str) -> Option<Value> {
    let hits = match jsonpath_lib::select(payload, path) {
        Ok(hits) => hits,
        Err(error) => {
            debug!(path, error = %error, "path query failed");
            return None;
        }
    };
    if is_definite(path) {
        hits.first().map(|hit| (*hit).clone())
    } else {
        Some(Value::Array(hits.into_iter().cloned().collect()))
    }
}

/// True when `path` contains no wildcard, deep scan, filter, union or slice.
pub fn is_definite(path: &str) -> bool {
    let mut chars = path.chars();
    let mut previous = '\0';
    while let Some(c) = chars.next() {
        match c {
            '*' => return false,
            '.' if previous == '.' => return false,
            '[' => {
                let body = bracket_body(&mut chars);
                let trimmed = body.trim();
                if trimmed.starts_with('\'') || trimmed.starts_with('"') {
                    previous = ']';
                    continue;
                }
                if trimmed.starts_with('?') || trimmed.contains([',', ':', '*']) {
                    return false;
                }
                previous = ']';
                continue;
            }
            _ => {}
        }
        previous = c;
    }
    true
}

/// Consumes up to and including the closing bracket, honoring quotes.
fn bracket_body(chars: &mut std::str::Chars<'_>) -> String {
    let mut body = String::new();
    let mut quote: Option<char> = None;
    for c in chars.by_ref() {
        match (quote, c) {
            (None, ']') => break,
            (None, '\'' | '"') => quote = Some(c),
            (Some(open), _) if c == open => quote = None,
            _ => {}
        }
        body.push(c);
    }
    body
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn definite_paths() {
        assert!(is_definite("$.a.b"));
        assert!(is_definite("$['a b'].c"));
        assert!(is_definite("$.items[0].name"));
        assert!(is_definite("$['x,y']"));
        assert!(!is_definite("$.items[*].name"));
        assert!(!is_definite("$..name"));
        assert!(!is_definite("$.items[?(@.a == 1)]"));
        assert!(!is_definite("$.items[0,1]"));
        assert!(!is_definite("$.items[0:2]"));
        assert!(!is_definite("$.a.*"));
    }

    #[test]
    fn select_definite_and_indefinite() {
        let payload = json!({"line": {"duration": 120}, "items": [{"n": 1}, {"n": 2}]});
        assert_eq!(select(&payload, "$.line.duration"), json!(120));
        assert_eq!(select(&payload, "$.line.missing"), Value::Null);
        assert_eq!(select(&payload, "$.items[*].n"), json!([1, 2]));
        assert_eq!(select(&payload, "$.nothing[*]"), json!([]));
    }

    #[test]
    fn invalid_path_is_null() {
        let payload = json!({"a": 1});
        assert_eq!(select(&payload, "$.a["), Value::Null);
        assert_eq!(find(&payload, "$.a["), None);
    }
}
