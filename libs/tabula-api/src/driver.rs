use chrono::{DateTime, FixedOffset, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::value::Value;

/// Value/validity pair used by driver-style APIs for an optional scalar.
///
/// `value` is meaningless when `valid` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Nullable<T> {
    pub value: T,
    pub valid: bool,
}

/// `value` may be omitted when `valid` is false; a valid pair without a
/// payload is rejected rather than filled with `T::default()`.
impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<V> {
            value: Option<V>,
            valid: bool,
        }
        let raw = Raw::<T>::deserialize(deserializer)?;
        match (raw.valid, raw.value) {
            (true, Some(value)) => Ok(Self::new(value)),
            (true, None) => Err(D::Error::custom("nullable marked valid but has no value")),
            (false, value) => Ok(Self {
                value: value.unwrap_or_default(),
                valid: false,
            }),
        }
    }
}

impl<T> Nullable<T> {
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> Nullable<T> {
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Self::new(v),
            None => Self::null(),
        }
    }
}

/// Any value arriving at the boundary from a driver, either as a bound
/// query parameter or as a result column.
///
/// The enumeration is closed on purpose: the converter matches it
/// exhaustively, so adding a kind forces a decision about its mapping.
/// `Bytes`, `List` and `Map` are kinds drivers commonly hand over that the
/// engine has no variant for; they are always rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DriverValue {
    /// Already tagged — passes through untouched.
    Value(Value),
    Nil,

    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    #[serde(deserialize_with = "finite_f32")]
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Timestamp(DateTime<FixedOffset>),

    NullInt16(Nullable<i16>),
    NullInt32(Nullable<i32>),
    NullInt64(Nullable<i64>),
    NullFloat64(Nullable<f64>),
    NullBool(Nullable<bool>),
    NullString(Nullable<String>),
    NullTime(Nullable<DateTime<FixedOffset>>),
    NullByte(Nullable<u8>),

    Bytes(Vec<u8>),
    List(Vec<DriverValue>),
    Map(Vec<(String, DriverValue)>),
}

impl DriverValue {
    /// Name of the concrete kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DriverValue::Value(v) => v.type_name(),
            DriverValue::Nil => "nil",
            DriverValue::I8(_) => "i8",
            DriverValue::I16(_) => "i16",
            DriverValue::I32(_) => "i32",
            DriverValue::I64(_) => "i64",
            DriverValue::Isize(_) => "isize",
            DriverValue::U8(_) => "u8",
            DriverValue::U16(_) => "u16",
            DriverValue::U32(_) => "u32",
            DriverValue::U64(_) => "u64",
            DriverValue::Usize(_) => "usize",
            DriverValue::F32(_) => "f32",
            DriverValue::F64(_) => "f64",
            DriverValue::Bool(_) => "bool",
            DriverValue::Str(_) => "String",
            DriverValue::Timestamp(_) => "DateTime",
            DriverValue::NullInt16(_) => "Nullable<i16>",
            DriverValue::NullInt32(_) => "Nullable<i32>",
            DriverValue::NullInt64(_) => "Nullable<i64>",
            DriverValue::NullFloat64(_) => "Nullable<f64>",
            DriverValue::NullBool(_) => "Nullable<bool>",
            DriverValue::NullString(_) => "Nullable<String>",
            DriverValue::NullTime(_) => "Nullable<DateTime>",
            DriverValue::NullByte(_) => "Nullable<u8>",
            DriverValue::Bytes(_) => "bytes",
            DriverValue::List(_) => "list",
            DriverValue::Map(_) => "map",
        }
    }
}

/// Reject numbers the `f32` cast would turn into infinity.
fn finite_f32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let wide = f64::deserialize(deserializer)?;
    let narrow = wide as f32;
    if wide.is_finite() && !narrow.is_finite() {
        return Err(D::Error::custom(format!("{wide} is out of range for f32")));
    }
    Ok(narrow)
}

// ---------------------------------------------------------------------------
// From impls: native types → DriverValue
// ---------------------------------------------------------------------------

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DriverValue {
                fn from(v: $ty) -> Self {
                    DriverValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_native! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => Str,
    DateTime<FixedOffset> => Timestamp,
    Vec<u8> => Bytes,
    Value => Value,
}

macro_rules! impl_from_option {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Option<$ty>> for DriverValue {
                fn from(v: Option<$ty>) -> Self {
                    DriverValue::$variant(Nullable::from(v))
                }
            }

            impl From<Nullable<$ty>> for DriverValue {
                fn from(v: Nullable<$ty>) -> Self {
                    DriverValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_option! {
    i16 => NullInt16,
    i32 => NullInt32,
    i64 => NullInt64,
    f64 => NullFloat64,
    bool => NullBool,
    String => NullString,
    DateTime<FixedOffset> => NullTime,
    u8 => NullByte,
}

impl From<&str> for DriverValue {
    fn from(v: &str) -> Self {
        DriverValue::Str(v.to_string())
    }
}

impl From<DateTime<Utc>> for DriverValue {
    fn from(v: DateTime<Utc>) -> Self {
        DriverValue::Timestamp(v.fixed_offset())
    }
}
