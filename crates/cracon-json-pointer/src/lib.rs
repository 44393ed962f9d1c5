//! JSON Pointer (RFC 6901) navigation for configuration documents.
//!
//! Read navigation never fails: anything that cannot be reached is simply
//! absent. Write navigation ([`set`]) creates the intermediate objects a
//! pointer needs, so `/a/b/c` can be assigned into an empty document.
//!
//! # Example
//!
//! ```
//! use cracon_json_pointer::{get, parse_json_pointer, set};
//! use serde_json::{json, Value};
//!
//! let mut doc = json!({});
//! let path = parse_json_pointer("/car/speed");
//! set(&mut doc, &path, json!(9000)).unwrap();
//! assert_eq!(doc, json!({"car": {"speed": 9000}}));
//! assert_eq!(get(&doc, &path), Some(&json!(9000)));
//! assert_eq!(get(&doc, &parse_json_pointer("/car/speed/unit")), None::<&Value>);
//! ```

use thiserror::Error;

mod get;
mod set;
pub mod validate;

pub use get::{get, get_mut};
pub use set::{set, MAX_INDEX_GAP};
pub use validate::{validate_json_pointer, validate_path, ValidationError};

/// A step in a JSON Pointer path: an object key or a decimal array index.
pub type PathStep = String;

/// A parsed JSON Pointer.
pub type Path = Vec<PathStep>;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use cracon_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use cracon_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path components.
///
/// The empty string is the root (empty path). The leading `/` is stripped
/// and every component is unescaped. Callers that need to reject relative
/// pointers run [`validate_json_pointer`] first.
///
/// ```
/// use cracon_json_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/foo/bar"), vec!["foo", "bar"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
///
/// ```
/// use cracon_json_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["a/b".to_string(), "c".to_string()]), "/a~1b/c");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a string is a valid array index: decimal digits, no leading zero.
///
/// ```
/// use cracon_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("INVALID_INDEX: {0:?} is not an array index")]
    InvalidIndex(String),
    #[error("NOT_CONTAINER: cannot descend into a scalar at step {0:?}")]
    NotContainer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~0~0"), "~~");
        assert_eq!(unescape_component("~1~1"), "//");
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
        assert_eq!(escape_component("~~"), "~0~0");
    }

    #[test]
    fn test_parse_json_pointer() {
        assert_eq!(parse_json_pointer(""), Vec::<String>::new());
        assert_eq!(parse_json_pointer("/"), vec![""]);
        assert_eq!(parse_json_pointer("/a~0b/c~1d/1"), vec!["a~b", "c/d", "1"]);
        assert_eq!(parse_json_pointer("/foo///"), vec!["foo", "", "", ""]);
    }

    #[test]
    fn test_roundtrip() {
        for pointer in ["", "/", "/foo", "/a~0b/c~1d/1", "/foo///"] {
            let path = parse_json_pointer(pointer);
            assert_eq!(format_json_pointer(&path), pointer, "roundtrip {pointer:?}");
        }
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("10"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("-"));
    }
}
