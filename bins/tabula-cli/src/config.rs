use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tabula_config_hcl::HclParser;
use tabula_engine::config::{EngineConfig, OutputFormat};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tabula", about = "Normalize driver values into engine values")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Path to TOML or HCL configuration file.
    #[arg(long, global = true, env = "TABULA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format, overrides `output.format` from the config.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Read input from this file instead of stdin.
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one JSON-encoded driver value per line.
    Convert,
    /// Convert one JSON array of driver values per line as a result row.
    Row(RowArgs),
    /// Bind one JSON array of driver values per line as query parameters.
    Bind(BindArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RowArgs {
    /// Comma-separated column names.
    #[arg(long, value_delimiter = ',', required = true)]
    pub columns: Vec<String>,
}

#[derive(Args, Clone, Debug)]
pub struct BindArgs {
    /// Placeholder count of the statement; checked when `binding.strict_arity` is on.
    #[arg(long)]
    pub placeholders: Option<usize>,
}

impl GlobalArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn effective_config(&self) -> Result<EngineConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let cfg = EngineConfig::load(path, &[&HclParser])?;
                tracing::info!(config = %path.display(), "loaded configuration");
                cfg
            }
            None => EngineConfig::default(),
        };
        if let Some(format) = self.format {
            config.output.format = format;
        }
        Ok(config)
    }

    pub fn open_input(&self) -> Result<Box<dyn BufRead>, CliError> {
        match &self.input {
            Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            None => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}
