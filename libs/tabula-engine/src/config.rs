use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::EngineError;

/// Root configuration — parsed from TOML, or any format with a registered
/// [`ConfigParser`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub binding: BindingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Limits applied when binding query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    /// Upper bound on parameters in one statement.
    #[serde(default = "default_max_params")]
    pub max_params: usize,

    /// Reject a parameter list whose length differs from the placeholder count.
    #[serde(default = "default_strict_arity")]
    pub strict_arity: bool,
}

fn default_max_params() -> usize {
    65535
}

fn default_strict_arity() -> bool {
    true
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            max_params: default_max_params(),
            strict_arity: default_strict_arity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format '{other}' (expected json or text)")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// strftime pattern for timestamps in text output. RFC 3339 when unset.
    #[serde(default)]
    pub timestamp_format: Option<String>,
}

/// Config file format. Selected by file extension.
pub trait ConfigParser: Send + Sync {
    fn extensions(&self) -> &[&str];
    fn parse(&self, content: &str) -> Result<EngineConfig, EngineError>;
}

pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<EngineConfig, EngineError> {
        EngineConfig::parse(content)
    }
}

impl EngineConfig {
    /// Load configuration from a file, choosing the parser by extension.
    ///
    /// TOML is always available; `parsers` adds further formats.
    pub fn load(path: &Path, parsers: &[&dyn ConfigParser]) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let parser = parsers
            .iter()
            .copied()
            .chain(std::iter::once(&TomlParser as &dyn ConfigParser))
            .find(|p| p.extensions().contains(&ext))
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "{}: no parser for extension '{ext}'",
                    path.display()
                ))
            })?;

        parser
            .parse(&content)
            .map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}
