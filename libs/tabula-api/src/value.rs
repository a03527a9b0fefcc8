use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Tagged value — the only representation the query engine evaluates.
///
/// The set is closed: every external value either maps onto exactly one
/// variant or is rejected at the boundary (see [`crate::converter`]).
/// Each variant owns its payload; values are never shared with the
/// driver that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Offset is kept as supplied — no normalization to UTC.
    Timestamp(DateTime<FixedOffset>),
    Null,
}

impl Value {
    /// Lower-case variant name, stable across releases.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Timestamp(_) => "timestamp",
            Value::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            Value::Null => f.write_str("NULL"),
        }
    }
}

/// Positional array of values. Order matches the column list the row
/// was converted for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}
