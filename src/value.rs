//! Primitive type tags, typed values and the string coercion table.

use crate::error::{ConfigError, ParseError};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use std::fmt;
use std::num::ParseIntError;

/// Primitive kind a configuration field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    /// Integer of a specific width; literals outside it fail coercion.
    Integer(IntKind),
    Float,
    Boolean,
}

macro_rules! int_kinds {
    ($($kind:ident => $ty:ident),* $(,)?) => {
        /// Width and signedness of an integer field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum IntKind {
            $($kind,)*
        }

        impl IntKind {
            fn from_name(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($ty) {
                        return Some(IntKind::$kind);
                    }
                )*
                None
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(IntKind::$kind => stringify!($ty),)*
                }
            }

            /// Parse a literal of exactly this width.
            fn parse(self, raw: &str) -> Result<i128, ParseIntError> {
                match self {
                    $(IntKind::$kind => raw.parse::<$ty>().map(|n| n as i128),)*
                }
            }

            pub fn contains(self, n: i128) -> bool {
                match self {
                    $(IntKind::$kind => $ty::try_from(n).is_ok(),)*
                }
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    // Lossless: every supported width fits in i128.
                    Value::Integer(n as i128)
                }
            }

            impl FromValue for $ty {
                const TYPE_TAG: TypeTag = TypeTag::Integer(IntKind::$kind);

                fn from_value(value: Value) -> Result<Self, String> {
                    match value {
                        Value::Integer(n) => $ty::try_from(n)
                            .map_err(|_| format!("{} does not fit in {}", n, stringify!($ty))),
                        other => Err(format!("expected integer, got {}", other.kind_name())),
                    }
                }
            }
        )*
    };
}

int_kinds! {
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    Usize => usize,
}

impl TypeTag {
    /// Map a declared type name onto its tag.
    ///
    /// Accepts Rust primitive names (`u16`, `f64`, `String`, ...) as well as
    /// the generic spellings `string`, `integer` (an `i64`), `float` and `boolean`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(kind) = IntKind::from_name(name) {
            return Some(TypeTag::Integer(kind));
        }
        let tag = match name {
            "String" | "str" | "&str" | "string" => TypeTag::String,
            "int" | "integer" => TypeTag::Integer(IntKind::I64),
            "f32" | "f64" | "float" => TypeTag::Float,
            "bool" | "boolean" => TypeTag::Boolean,
            _ => return None,
        };
        Some(tag)
    }

    /// Value used for a missing field under lenient resolution.
    pub fn zero_value(self) -> Value {
        match self {
            TypeTag::String => Value::String(String::new()),
            TypeTag::Integer(_) => Value::Integer(0),
            TypeTag::Float => Value::Float(0.0),
            TypeTag::Boolean => Value::Boolean(false),
        }
    }

    /// Coerce a raw environment string into a value of this kind.
    ///
    /// Numeric literals are trimmed first. `key` is only used to label a failure.
    pub fn coerce(self, key: &str, raw: &str) -> Result<Value, ConfigError> {
        let coerced = match self {
            TypeTag::String => Ok(Value::String(raw.to_string())),
            TypeTag::Integer(kind) => kind
                .parse(raw.trim())
                .map(Value::Integer)
                .map_err(ParseError::from),
            TypeTag::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(ParseError::from),
            TypeTag::Boolean => Ok(Value::Boolean(parse_flag(raw))),
        };

        coerced.map_err(|source| ConfigError::Coercion {
            key: key.to_string(),
            expected: self,
            source,
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::String => "string",
            TypeTag::Integer(kind) => kind.name(),
            TypeTag::Float => "float",
            TypeTag::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Only the literal `true`, in any casing, turns a flag on.
///
/// Everything else, including `1`, `yes` and the empty string, is `false`.
pub fn parse_flag(raw: &str) -> bool {
    raw.to_lowercase() == "true"
}

/// A fully typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i128),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
        }
    }

    /// Whether this value can be stored in a field declared as `tag`.
    pub fn fits(&self, tag: TypeTag) -> bool {
        match (self, tag) {
            (Value::String(_), TypeTag::String)
            | (Value::Float(_), TypeTag::Float)
            | (Value::Boolean(_), TypeTag::Boolean) => true,
            (Value::Integer(n), TypeTag::Integer(kind)) => kind.contains(*n),
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

/// Conversion from a resolved [`Value`] into a concrete Rust field type.
pub trait FromValue: Sized {
    /// Tag the field is declared with when this type is used in a schema.
    const TYPE_TAG: TypeTag;

    fn from_value(value: Value) -> Result<Self, String>;
}

impl FromValue for String {
    const TYPE_TAG: TypeTag = TypeTag::String;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(format!("expected string, got {}", other.kind_name())),
        }
    }
}

impl FromValue for bool {
    const TYPE_TAG: TypeTag = TypeTag::Boolean;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(format!("expected boolean, got {}", other.kind_name())),
        }
    }
}

impl FromValue for f64 {
    const TYPE_TAG: TypeTag = TypeTag::Float;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(format!("expected float, got {}", other.kind_name())),
        }
    }
}

impl FromValue for f32 {
    const TYPE_TAG: TypeTag = TypeTag::Float;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(x) => Ok(x as f32),
            other => Err(format!("expected float, got {}", other.kind_name())),
        }
    }
}

/// Serde view of a single [`Value`], used to build deserializable records.
pub struct ValueDeserializer(Value);

impl<'de> IntoDeserializer<'de, de::value::Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer(self)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::String(s) => visitor.visit_string(s),
            Value::Integer(n) => {
                if let Ok(n) = i64::try_from(n) {
                    visitor.visit_i64(n)
                } else if let Ok(n) = u64::try_from(n) {
                    visitor.visit_u64(n)
                } else {
                    visitor.visit_i128(n)
                }
            }
            Value::Float(x) => visitor.visit_f64(x),
            Value::Boolean(b) => visitor.visit_bool(b),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_some(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
