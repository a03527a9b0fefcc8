use crate::driver::DriverValue;
use crate::error::ConvertError;
use crate::value::Value;

/// Driver-facing value conversion hook.
///
/// Called once per bound parameter and once per received result column.
/// Implementations must be stateless with respect to the values they see:
/// the same input always yields the same output or the same error.
pub trait ValueConverter: Send + Sync {
    fn convert_value(&self, value: DriverValue) -> Result<Value, ConvertError>;
}

/// The engine's standard conversion table, see [`convert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl ValueConverter for DefaultConverter {
    fn convert_value(&self, value: DriverValue) -> Result<Value, ConvertError> {
        convert(value)
    }
}

/// True iff `value` is already a tagged [`Value`]. [`convert`] returns
/// such values as-is.
pub fn is_tagged(value: &DriverValue) -> bool {
    matches!(value, DriverValue::Value(_))
}

/// Map an external value onto exactly one tagged variant.
///
/// Tagged values pass through unchanged and `Nil` becomes `Null`. Unsigned
/// values that do not fit `i64` fail with [`ErrorKind::Overflow`] rather
/// than wrapping. `Bytes`, `List` and `Map` fail with
/// [`ErrorKind::Unsupported`] naming the kind.
///
/// [`ErrorKind::Overflow`]: crate::error::ErrorKind::Overflow
/// [`ErrorKind::Unsupported`]: crate::error::ErrorKind::Unsupported
pub fn convert(value: DriverValue) -> Result<Value, ConvertError> {
    match value {
        // Checked first: tagged values are never re-wrapped.
        DriverValue::Value(v) => Ok(v),
        DriverValue::Nil => Ok(Value::Null),

        DriverValue::I8(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::I16(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::I32(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::I64(v) => Ok(Value::Integer(v)),
        DriverValue::Isize(v) => i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| ConvertError::overflow()),
        DriverValue::U8(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::U16(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::U32(v) => Ok(Value::Integer(i64::from(v))),
        DriverValue::U64(v) => i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| ConvertError::overflow()),
        DriverValue::Usize(v) => i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| ConvertError::overflow()),
        DriverValue::F32(v) => Ok(Value::Float(f64::from(v))),
        DriverValue::F64(v) => Ok(Value::Float(v)),
        DriverValue::Bool(v) => Ok(Value::Boolean(v)),
        DriverValue::Str(v) => Ok(Value::Text(v)),
        DriverValue::Timestamp(v) => Ok(Value::Timestamp(v)),

        DriverValue::NullInt16(n) => unwrap_nullable(n.into_option().map(DriverValue::I16)),
        DriverValue::NullInt32(n) => unwrap_nullable(n.into_option().map(DriverValue::I32)),
        DriverValue::NullInt64(n) => unwrap_nullable(n.into_option().map(DriverValue::I64)),
        DriverValue::NullFloat64(n) => unwrap_nullable(n.into_option().map(DriverValue::F64)),
        DriverValue::NullBool(n) => unwrap_nullable(n.into_option().map(DriverValue::Bool)),
        DriverValue::NullString(n) => unwrap_nullable(n.into_option().map(DriverValue::Str)),
        DriverValue::NullTime(n) => unwrap_nullable(n.into_option().map(DriverValue::Timestamp)),
        // Single byte becomes a one-character text (Latin-1 code point).
        DriverValue::NullByte(n) => unwrap_nullable(
            n.into_option()
                .map(|b| DriverValue::Str(char::from(b).to_string())),
        ),

        other @ (DriverValue::Bytes(_) | DriverValue::List(_) | DriverValue::Map(_)) => {
            Err(ConvertError::unsupported(other.kind_name()))
        }
    }
}

fn unwrap_nullable(inner: Option<DriverValue>) -> Result<Value, ConvertError> {
    match inner {
        Some(v) => convert(v),
        None => Ok(Value::Null),
    }
}
