use std::io::{BufRead, Write};

use tabula_api::Row;
use tabula_engine::binder::{Binder, NamedValue};
use tabula_engine::config::EngineConfig;

use crate::config::{BindArgs, GlobalArgs};
use crate::error::CliError;
use crate::render;

pub fn run(global: &GlobalArgs, args: BindArgs) -> Result<(), CliError> {
    let config = global.effective_config()?;
    let statements = process(global.open_input()?, &mut std::io::stdout().lock(), &config, &args)?;
    tracing::info!(statements, "parameters bound");
    Ok(())
}

fn process(
    input: impl BufRead,
    out: &mut impl Write,
    config: &EngineConfig,
    args: &BindArgs,
) -> Result<usize, CliError> {
    let binder = Binder::new(config.binding.clone());
    let mut statements = 0usize;
    for entry in super::lines(input) {
        let (line, text) = entry?;
        let params: Vec<NamedValue> = super::parse_list(line, &text)?
            .into_iter()
            .enumerate()
            .map(|(i, v)| NamedValue::positional(i + 1, v))
            .collect();

        let bound = match args.placeholders {
            Some(expected) => binder.bind_exact(expected, params),
            None => binder.bind(params),
        }
        .map_err(|source| CliError::Line { line, source })?;

        writeln!(out, "{}", render::row(&Row(bound), &config.output)?)?;
        statements += 1;
    }
    Ok(statements)
}
