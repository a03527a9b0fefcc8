use std::fmt::Write;

use tabula_api::{Row, Value};
use tabula_engine::config::{OutputConfig, OutputFormat};

use crate::error::CliError;

pub fn value(value: &Value, out: &OutputConfig) -> Result<String, CliError> {
    match out.format {
        OutputFormat::Json => serde_json::to_string(value).map_err(|e| CliError::Render(e.to_string())),
        OutputFormat::Text => text(value, out),
    }
}

/// JSON: array of tagged values. Text: tab-separated.
pub fn row(row: &Row, out: &OutputConfig) -> Result<String, CliError> {
    match out.format {
        OutputFormat::Json => serde_json::to_string(row).map_err(|e| CliError::Render(e.to_string())),
        OutputFormat::Text => {
            let cells = row
                .0
                .iter()
                .map(|v| text(v, out))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(cells.join("\t"))
        }
    }
}

fn text(value: &Value, out: &OutputConfig) -> Result<String, CliError> {
    match (value, out.timestamp_format.as_deref()) {
        (Value::Timestamp(ts), Some(pattern)) => {
            let mut s = String::new();
            write!(s, "{}", ts.format(pattern))
                .map_err(|_| CliError::Render(format!("invalid timestamp format '{pattern}'")))?;
            Ok(s)
        }
        _ => Ok(value.to_string()),
    }
}
