use std::fmt;
use std::sync::Arc;

use tabula_api::{is_tagged, DefaultConverter, DriverValue, Row, Value, ValueConverter};

use crate::config::BindingConfig;
use crate::error::EngineError;

/// One query parameter as handed over by a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    /// `None` for positional placeholders.
    pub name: Option<String>,
    /// 1-based position in the parameter list.
    pub ordinal: usize,
    pub value: DriverValue,
}

impl NamedValue {
    pub fn positional(ordinal: usize, value: impl Into<DriverValue>) -> Self {
        Self {
            name: None,
            ordinal,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, ordinal: usize, value: impl Into<DriverValue>) -> Self {
        Self {
            name: Some(name.into()),
            ordinal,
            value: value.into(),
        }
    }
}

/// Placeholder label used in error context: `:name` or `$ordinal`.
struct ParamLabel<'a>(&'a NamedValue);

impl fmt::Display for ParamLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.name {
            Some(name) => write!(f, "parameter :{name}"),
            None => write!(f, "parameter ${}", self.0.ordinal),
        }
    }
}

/// Applies a [`ValueConverter`] to parameter lists and result rows.
///
/// Holds no per-call state; one binder can serve any number of
/// connections concurrently.
pub struct Binder {
    converter: Arc<dyn ValueConverter>,
    config: BindingConfig,
}

impl Binder {
    /// Binder backed by [`DefaultConverter`].
    pub fn new(config: BindingConfig) -> Self {
        Self::with_converter(config, Arc::new(DefaultConverter))
    }

    pub fn with_converter(config: BindingConfig, converter: Arc<dyn ValueConverter>) -> Self {
        Self { converter, config }
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Convert query parameters in order. Fails on the first parameter
    /// that cannot be converted; nothing is returned for the others.
    pub fn bind(&self, params: Vec<NamedValue>) -> Result<Vec<Value>, EngineError> {
        if params.len() > self.config.max_params {
            return Err(EngineError::TooManyParams {
                max: self.config.max_params,
                got: params.len(),
            });
        }

        let passthrough = params.iter().filter(|p| is_tagged(&p.value)).count();
        tracing::debug!(params = params.len(), passthrough, "binding parameters");

        let mut bound = Vec::with_capacity(params.len());
        for param in params {
            let kind = param.value.kind_name();
            let label = ParamLabel(&param).to_string();
            let value = self.converter.convert_value(param.value).map_err(|e| {
                tracing::warn!(ordinal = param.ordinal, kind, error = %e, "parameter conversion failed");
                EngineError::from(e).with_context(&label)
            })?;
            bound.push(value);
        }
        Ok(bound)
    }

    /// Like [`Binder::bind`], but checks the parameter count against the
    /// statement's placeholder count when `strict_arity` is on.
    pub fn bind_exact(
        &self,
        expected: usize,
        params: Vec<NamedValue>,
    ) -> Result<Vec<Value>, EngineError> {
        if self.config.strict_arity && params.len() != expected {
            return Err(EngineError::Arity {
                expected,
                got: params.len(),
            });
        }
        self.bind(params)
    }

    /// Convert one result row. `values[i]` belongs to `columns[i]`.
    pub fn convert_row(
        &self,
        columns: &[String],
        values: Vec<DriverValue>,
    ) -> Result<Row, EngineError> {
        if columns.len() != values.len() {
            return Err(EngineError::ColumnCount {
                expected: columns.len(),
                got: values.len(),
            });
        }

        let mut row = Vec::with_capacity(values.len());
        for (column, value) in columns.iter().zip(values) {
            let kind = value.kind_name();
            let converted = self.converter.convert_value(value).map_err(|e| {
                tracing::warn!(column = %column, kind, error = %e, "column conversion failed");
                EngineError::from(e).with_context(format!("column '{column}'"))
            })?;
            row.push(converted);
        }
        tracing::trace!(columns = columns.len(), "row converted");
        Ok(Row(row))
    }
}
