use std::io::{BufRead, Write};

use tabula_engine::binder::Binder;
use tabula_engine::config::EngineConfig;

use crate::config::{GlobalArgs, RowArgs};
use crate::error::CliError;
use crate::render;

pub fn run(global: &GlobalArgs, args: RowArgs) -> Result<(), CliError> {
    let config = global.effective_config()?;
    let rows = process(global.open_input()?, &mut std::io::stdout().lock(), &config, &args)?;
    tracing::info!(rows, columns = args.columns.len(), "rows converted");
    Ok(())
}

fn process(
    input: impl BufRead,
    out: &mut impl Write,
    config: &EngineConfig,
    args: &RowArgs,
) -> Result<usize, CliError> {
    let binder = Binder::new(config.binding.clone());
    let mut rows = 0usize;
    for entry in super::lines(input) {
        let (line, text) = entry?;
        let values = super::parse_list(line, &text)?;
        let row = binder
            .convert_row(&args.columns, values)
            .map_err(|source| CliError::Line { line, source })?;
        writeln!(out, "{}", render::row(&row, &config.output)?)?;
        rows += 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tabula_engine::config::OutputFormat;

    use super::*;

    fn args(columns: &[&str]) -> RowArgs {
        RowArgs {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn rows_render_as_text() {
        let mut config = EngineConfig::default();
        config.output.format = OutputFormat::Text;
        let mut out = Vec::new();
        let input = Cursor::new(
            "[{\"kind\":\"str\",\"value\":\"a\"},{\"kind\":\"null_bool\",\"value\":{\"valid\":false}}]\n",
        );
        let rows = process(input, &mut out, &config, &args(&["name", "flag"])).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "a\tNULL\n");
    }

    #[test]
    fn column_error_carries_line_and_column() {
        let mut out = Vec::new();
        let input = Cursor::new("[{\"kind\":\"nil\"}]\n[{\"kind\":\"bytes\",\"value\":[1]}]\n");
        let err = process(input, &mut out, &EngineConfig::default(), &args(&["blob"])).unwrap_err();
        assert_eq!(err.to_string(), "line 2: column 'blob': unsupported type: bytes");
    }

    #[test]
    fn short_row_is_rejected() {
        let mut out = Vec::new();
        let input = Cursor::new("[{\"kind\":\"i32\",\"value\":1}]\n");
        let err = process(input, &mut out, &EngineConfig::default(), &args(&["a", "b"])).unwrap_err();
        assert!(matches!(err, CliError::Line { line: 1, .. }));
    }
}
