//! Syntax checks run before a pointer is used to address a document.

use thiserror::Error;

/// Longest pointer string accepted, in bytes.
pub const MAX_POINTER_BYTES: usize = 1024;

/// Deepest path accepted, in steps.
pub const MAX_PATH_STEPS: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("POINTER_INVALID: pointer must start with '/'")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG: pointer exceeds {MAX_POINTER_BYTES} bytes")]
    PointerTooLong,
    #[error("INVALID_ESCAPE: '~' at byte {0} is not followed by '0' or '1'")]
    InvalidEscape(usize),
    #[error("PATH_TOO_LONG: path exceeds {MAX_PATH_STEPS} steps")]
    PathTooLong,
}

/// Check that `pointer` is a well-formed RFC 6901 pointer.
///
/// The empty string (the root) is accepted. Anything else must start with
/// `/`, fit in [`MAX_POINTER_BYTES`], and use `~` only in the escapes `~0`
/// and `~1`.
///
/// ```
/// use cracon_json_pointer::{validate_json_pointer, ValidationError};
///
/// assert!(validate_json_pointer("").is_ok());
/// assert!(validate_json_pointer("/a~1b/c~0d").is_ok());
/// assert_eq!(validate_json_pointer("foo"), Err(ValidationError::PointerInvalid));
/// assert_eq!(validate_json_pointer("/a~2b"), Err(ValidationError::InvalidEscape(2)));
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ValidationError> {
    let bytes = pointer.as_bytes();
    match bytes.first() {
        None => return Ok(()),
        Some(b'/') => {}
        Some(_) => return Err(ValidationError::PointerInvalid),
    }
    if bytes.len() > MAX_POINTER_BYTES {
        return Err(ValidationError::PointerTooLong);
    }
    let mut iter = bytes.iter().enumerate();
    while let Some((at, byte)) = iter.next() {
        if *byte == b'~' && !matches!(iter.next(), Some((_, b'0' | b'1'))) {
            return Err(ValidationError::InvalidEscape(at));
        }
    }
    Ok(())
}

/// Check the depth of a parsed path.
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_STEPS {
        return Err(ValidationError::PathTooLong);
    }
    Ok(())
}
