use serde_json::Value;

/// Get a value from a JSON document by path.
///
/// Returns `None` when the path cannot be followed: a missing key, an
/// index that is out of range or not an index at all, the `-` step, or a
/// scalar in the middle of the path. An explicit `null` is returned as
/// `Some(&Value::Null)`.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(parse_index(step)?)?,
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
///
/// Follows the same rules as [`get`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(parse_index(step)?)?,
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}

fn parse_index(step: &str) -> Option<usize> {
    if !crate::is_valid_index(step) {
        return None;
    }
    step.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_json_pointer;
    use serde_json::json;

    #[test]
    fn test_get_scalar_root() {
        assert_eq!(get(&json!(123), &[]), Some(&json!(123)));
    }

    #[test]
    fn test_get_nested() {
        let doc = json!({"this": {"is": {"pretty": {"deep": 42}}}});
        assert_eq!(
            get(&doc, &parse_json_pointer("/this/is/pretty/deep")),
            Some(&json!(42))
        );
        assert_eq!(get(&doc, &parse_json_pointer("/this/is/not")), None);
    }

    #[test]
    fn test_get_array_element() {
        let doc = json!({"v": [1, 2, 3]});
        assert_eq!(get(&doc, &parse_json_pointer("/v/1")), Some(&json!(2)));
        assert_eq!(get(&doc, &parse_json_pointer("/v/3")), None);
        assert_eq!(get(&doc, &parse_json_pointer("/v/-")), None);
        assert_eq!(get(&doc, &parse_json_pointer("/v/01")), None);
        assert_eq!(get(&doc, &parse_json_pointer("/v/x")), None);
    }

    #[test]
    fn test_get_through_scalar() {
        let doc = json!({"x": "hello"});
        assert_eq!(get(&doc, &parse_json_pointer("/x/y")), None);
    }

    #[test]
    fn test_get_explicit_null() {
        let doc = json!({"foo": null});
        assert_eq!(get(&doc, &parse_json_pointer("/foo")), Some(&Value::Null));
    }

    #[test]
    fn test_get_mut_replaces_in_place() {
        let mut doc = json!({"a": {"b": [1, 2]}});
        *get_mut(&mut doc, &parse_json_pointer("/a/b/0")).unwrap() = json!(7);
        assert_eq!(doc, json!({"a": {"b": [7, 2]}}));
        assert!(get_mut(&mut doc, &parse_json_pointer("/a/c")).is_none());
    }
}
