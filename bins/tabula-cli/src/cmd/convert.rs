use std::io::{BufRead, Write};

use tabula_api::{DefaultConverter, DriverValue, ValueConverter};
use tabula_engine::config::EngineConfig;
use tabula_engine::error::EngineError;

use crate::config::GlobalArgs;
use crate::error::CliError;
use crate::render;

pub fn run(global: &GlobalArgs) -> Result<(), CliError> {
    let config = global.effective_config()?;
    let count = process(global.open_input()?, &mut std::io::stdout().lock(), &config)?;
    tracing::info!(values = count, "conversion finished");
    Ok(())
}

/// Convert each input line, writing one rendered value per line.
/// Returns the number of values written.
fn process(
    input: impl BufRead,
    out: &mut impl Write,
    config: &EngineConfig,
) -> Result<usize, CliError> {
    let converter = DefaultConverter;
    let mut count = 0usize;
    for entry in super::lines(input) {
        let (line, text) = entry?;
        let value: DriverValue =
            serde_json::from_str(&text).map_err(|source| CliError::Input { line, source })?;
        tracing::debug!(line, kind = value.kind_name(), "converting");
        let value = converter.convert_value(value).map_err(|e| CliError::Line {
            line,
            source: EngineError::from(e),
        })?;
        writeln!(out, "{}", render::value(&value, &config.output)?)?;
        count += 1;
    }
    Ok(count)
}
