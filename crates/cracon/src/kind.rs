//! The closed set of value shapes a configuration entry can take.

use std::fmt;

/// Semantic type requested by a typed read or write.
///
/// Every [`ConfigValue`](crate::ConfigValue) maps to exactly one kind; the
/// similarity check dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    /// Signed integer of the given bit width.
    Int { bits: u32 },
    /// Unsigned integer of the given bit width.
    Uint { bits: u32 },
    /// IEEE float of the given bit width (32 or 64).
    Float { bits: u32 },
    Str,
    /// Fixed-size sequence: exactly `len` elements of `elem`.
    Array { elem: Box<ValueKind>, len: usize },
    /// Variable-size sequence of `elem`.
    Vec { elem: Box<ValueKind> },
    /// Enumeration stored as its integer discriminant.
    Enum {
        name: &'static str,
        repr: Box<ValueKind>,
    },
}

impl ValueKind {
    pub fn array(elem: ValueKind, len: usize) -> Self {
        Self::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn vec(elem: ValueKind) -> Self {
        Self::Vec {
            elem: Box::new(elem),
        }
    }

    /// Kind of an enumeration whose discriminant is stored as `R`.
    pub fn enumeration<R: crate::EnumRepr>(name: &'static str) -> Self {
        Self::Enum {
            name,
            repr: Box::new(R::kind()),
        }
    }

    /// Inclusive integer range representable by an integer kind.
    ///
    /// `None` for every non-integer kind.
    pub fn int_range(&self) -> Option<(i128, i128)> {
        match self {
            Self::Int { bits } => {
                let half = 1i128 << (bits - 1);
                Some((-half, half - 1))
            }
            Self::Uint { bits } => Some((0, (1i128 << bits) - 1)),
            Self::Enum { repr, .. } => repr.int_range(),
            _ => None,
        }
    }

    /// Largest finite magnitude of a float kind.
    pub fn float_max(&self) -> Option<f64> {
        match self {
            Self::Float { bits: 32 } => Some(f32::MAX as f64),
            Self::Float { .. } => Some(f64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int { bits } => write!(f, "i{bits}"),
            Self::Uint { bits } => write!(f, "u{bits}"),
            Self::Float { bits } => write!(f, "f{bits}"),
            Self::Str => f.write_str("string"),
            Self::Array { elem, len } => write!(f, "[{elem}; {len}]"),
            Self::Vec { elem } => write!(f, "Vec<{elem}>"),
            Self::Enum { name, repr } => write!(f, "enum {name}({repr})"),
        }
    }
}
