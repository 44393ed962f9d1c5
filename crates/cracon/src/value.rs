//! Conversion between Rust values and JSON nodes.

use serde_json::Value;

use crate::kind::ValueKind;

/// A Rust type that can be stored in a configuration document.
///
/// Implemented for `bool`, the fixed-width integers, `isize`/`usize`,
/// `f32`/`f64`, `String`, `[T; N]` and `Vec<T>`. Enumerations opt in
/// through [`config_enum!`](crate::config_enum). Types without an
/// implementation cannot be read or written at all.
pub trait ConfigValue: Sized {
    /// The shape checked by [`is_similar`](crate::is_similar).
    fn kind() -> ValueKind;

    fn to_json(&self) -> Value;

    /// Materialize from a node. Only called after the node passed the
    /// similarity check; `None` still means "not representable".
    fn from_json(value: &Value) -> Option<Self>;
}

/// Integer types usable as the stored representation of an enumeration.
pub trait EnumRepr: ConfigValue + Copy + PartialEq {}

impl ConfigValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

macro_rules! signed_value {
    ($($ty:ty),+) => {$(
        impl ConfigValue for $ty {
            fn kind() -> ValueKind {
                ValueKind::Int { bits: <$ty>::BITS }
            }

            fn to_json(&self) -> Value {
                Value::from(*self as i64)
            }

            fn from_json(value: &Value) -> Option<Self> {
                <$ty>::try_from(value.as_i64()?).ok()
            }
        }

        impl EnumRepr for $ty {}
    )+};
}

macro_rules! unsigned_value {
    ($($ty:ty),+) => {$(
        impl ConfigValue for $ty {
            fn kind() -> ValueKind {
                ValueKind::Uint { bits: <$ty>::BITS }
            }

            fn to_json(&self) -> Value {
                Value::from(*self as u64)
            }

            fn from_json(value: &Value) -> Option<Self> {
                <$ty>::try_from(value.as_u64()?).ok()
            }
        }

        impl EnumRepr for $ty {}
    )+};
}

signed_value!(i8, i16, i32, i64, isize);
unsigned_value!(u8, u16, u32, u64, usize);

impl ConfigValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float { bits: 32 }
    }

    // Non-finite values have no JSON form and are stored as null.
    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }
}

impl ConfigValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float { bits: 64 }
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl ConfigValue for String {
    fn kind() -> ValueKind {
        ValueKind::Str
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<T: ConfigValue> ConfigValue for Vec<T> {
    fn kind() -> ValueKind {
        ValueKind::vec(T::kind())
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ConfigValue::to_json).collect())
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_json).collect()
    }
}

impl<T: ConfigValue, const N: usize> ConfigValue for [T; N] {
    fn kind() -> ValueKind {
        ValueKind::array(T::kind(), N)
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ConfigValue::to_json).collect())
    }

    fn from_json(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() != N {
            return None;
        }
        let parsed = items.iter().map(T::from_json).collect::<Option<Vec<T>>>()?;
        parsed.try_into().ok()
    }
}

/// Implement [`ConfigValue`] for a fieldless enum, stored as an integer.
///
/// The representation must be one of the integer types; anything else is
/// rejected at compile time. Reading a discriminant that names no variant
/// is handled like a type mismatch.
///
/// ```
/// use cracon::{config_enum, ConfigValue};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Gear {
///     Park,
///     Drive,
///     Reverse,
/// }
///
/// config_enum!(Gear: u8 { Park = 0, Drive = 1, Reverse = 2 });
///
/// assert_eq!(Gear::Drive.to_json(), serde_json::json!(1));
/// assert_eq!(Gear::from_json(&serde_json::json!(2)), Some(Gear::Reverse));
/// assert_eq!(Gear::from_json(&serde_json::json!(7)), None);
/// ```
#[macro_export]
macro_rules! config_enum {
    ($name:ident : $repr:ty { $($variant:ident = $disc:expr),+ $(,)? }) => {
        impl $crate::ConfigValue for $name {
            fn kind() -> $crate::ValueKind {
                $crate::ValueKind::enumeration::<$repr>(stringify!($name))
            }

            fn to_json(&self) -> $crate::Value {
                let disc: $repr = match self {
                    $($name::$variant => $disc,)+
                };
                <$repr as $crate::ConfigValue>::to_json(&disc)
            }

            fn from_json(value: &$crate::Value) -> Option<Self> {
                let disc = <$repr as $crate::ConfigValue>::from_json(value)?;
                $(
                    if disc == $disc {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }
    };
}
