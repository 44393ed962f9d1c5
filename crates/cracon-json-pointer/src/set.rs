use serde_json::{Map, Value};

use crate::{is_valid_index, PointerError};

/// Most `null` slots a single assignment may pad an array with.
pub const MAX_INDEX_GAP: usize = 1024;

/// Assign `value` at `path`, creating whatever the path needs on the way.
///
/// - a missing object key is inserted and a `null` node becomes an object;
/// - on arrays `-` appends, and an index at or past the end pads the array
///   with `null` up to that index, at most [`MAX_INDEX_GAP`] slots;
/// - the empty path replaces the whole document.
///
/// Returns a reference to the stored node.
///
/// # Errors
///
/// [`PointerError::InvalidIndex`] when an array is addressed with a step
/// that is not an index or lies more than [`MAX_INDEX_GAP`] past the end.
/// [`PointerError::NotContainer`] when a boolean, number or string sits in
/// the middle of the path. Errors are detected before anything is created,
/// so a failed call leaves `doc` untouched.
///
/// ```
/// use cracon_json_pointer::{parse_json_pointer, set};
/// use serde_json::json;
///
/// let mut doc = json!({"list": [1]});
/// set(&mut doc, &parse_json_pointer("/list/-"), json!(2)).unwrap();
/// set(&mut doc, &parse_json_pointer("/a/b"), json!(true)).unwrap();
/// assert_eq!(doc, json!({"list": [1, 2], "a": {"b": true}}));
/// ```
pub fn set<'a>(
    doc: &'a mut Value,
    path: &[String],
    value: Value,
) -> Result<&'a mut Value, PointerError> {
    let mut current = doc;
    for step in path {
        current = descend(current, step)?;
    }
    *current = value;
    Ok(current)
}

fn descend<'a>(node: &'a mut Value, step: &str) -> Result<&'a mut Value, PointerError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Ok(map.entry(step).or_insert(Value::Null)),
        Value::Array(arr) => {
            let idx = array_index(arr.len(), step)
                .ok_or_else(|| PointerError::InvalidIndex(step.to_string()))?;
            if idx >= arr.len() {
                arr.resize(idx + 1, Value::Null);
            }
            Ok(&mut arr[idx])
        }
        _ => Err(PointerError::NotContainer(step.to_string())),
    }
}

fn array_index(len: usize, step: &str) -> Option<usize> {
    if step == "-" {
        return Some(len);
    }
    if !is_valid_index(step) {
        return None;
    }
    let idx: usize = step.parse().ok()?;
    (idx.saturating_sub(len) <= MAX_INDEX_GAP).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_json_pointer;
    use serde_json::json;

    #[test]
    fn test_set_creates_deep_objects() {
        let mut doc = json!({});
        let stored = set(
            &mut doc,
            &parse_json_pointer("/nonexisting/but/now/it/does/hurray"),
            json!(500),
        )
        .unwrap();
        assert_eq!(*stored, json!(500));
        assert_eq!(
            doc,
            json!({"nonexisting": {"but": {"now": {"it": {"does": {"hurray": 500}}}}}})
        );
    }

    #[test]
    fn test_set_overwrites_existing() {
        let mut doc = json!({"a": {"b": 5, "c": 1}});
        set(&mut doc, &parse_json_pointer("/a/b"), json!(9)).unwrap();
        assert_eq!(doc, json!({"a": {"b": 9, "c": 1}}));
    }

    #[test]
    fn test_set_null_becomes_object() {
        let mut doc = json!({"a": null});
        set(&mut doc, &parse_json_pointer("/a/b"), json!("x")).unwrap();
        assert_eq!(doc, json!({"a": {"b": "x"}}));
    }

    #[test]
    fn test_set_array_index_and_padding() {
        let mut doc = json!({"v": [1, 2]});
        set(&mut doc, &parse_json_pointer("/v/0"), json!(10)).unwrap();
        set(&mut doc, &parse_json_pointer("/v/-"), json!(3)).unwrap();
        set(&mut doc, &parse_json_pointer("/v/5"), json!(6)).unwrap();
        assert_eq!(doc, json!({"v": [10, 2, 3, null, null, 6]}));
    }

    #[test]
    fn test_set_array_bad_index() {
        let mut doc = json!({"v": [1]});
        let err = set(&mut doc, &parse_json_pointer("/v/x/y"), json!(1)).unwrap_err();
        assert_eq!(err, PointerError::InvalidIndex("x".to_string()));
        assert_eq!(doc, json!({"v": [1]}));
    }

    #[test]
    fn test_set_through_scalar_is_rejected() {
        let mut doc = json!({"a": 5});
        let err = set(&mut doc, &parse_json_pointer("/a/b"), json!(1)).unwrap_err();
        assert_eq!(err, PointerError::NotContainer("b".to_string()));
        assert_eq!(doc, json!({"a": 5}));
    }

    #[test]
    fn test_set_root_replaces_document() {
        let mut doc = json!({"a": 1});
        set(&mut doc, &[], json!([1, 2])).unwrap();
        assert_eq!(doc, json!([1, 2]));
    }

    #[test]
    fn test_set_index_gap_is_capped() {
        let mut doc = json!({"v": [1]});
        let far = format!("/v/{}", 1 + MAX_INDEX_GAP);
        set(&mut doc, &parse_json_pointer(&far), json!(2)).unwrap();
        assert_eq!(doc["v"].as_array().unwrap().len(), MAX_INDEX_GAP + 2);

        let mut doc = json!({"v": [1]});
        let too_far = format!("/v/{}", 2 + MAX_INDEX_GAP);
        let err = set(&mut doc, &parse_json_pointer(&too_far), json!(2)).unwrap_err();
        assert_eq!(err, PointerError::InvalidIndex((2 + MAX_INDEX_GAP).to_string()));
        assert_eq!(doc, json!({"v": [1]}));
    }

    #[test]
    fn test_set_huge_index_is_rejected() {
        for step in [usize::MAX.to_string(), "100000000000".to_string(), "1".repeat(40)] {
            let mut doc = json!({"v": [1]});
            let err = set(&mut doc, &["v".to_string(), step.clone()], json!(2)).unwrap_err();
            assert_eq!(err, PointerError::InvalidIndex(step));
            assert_eq!(doc, json!({"v": [1]}));
        }
    }
}
