pub mod bind;
pub mod convert;
pub mod row;

use std::io::BufRead;

use tabula_api::DriverValue;

use crate::error::CliError;

/// Non-empty input lines with their 1-based line numbers.
pub(crate) fn lines(
    input: impl BufRead,
) -> impl Iterator<Item = Result<(usize, String), CliError>> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)).map_err(CliError::from))
        .filter(|r| !matches!(r, Ok((_, l)) if l.trim().is_empty()))
}

pub(crate) fn parse_list(line: usize, text: &str) -> Result<Vec<DriverValue>, CliError> {
    serde_json::from_str(text).map_err(|source| CliError::Input { line, source })
}
