use tabula_engine::error::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("line {line}: {source}")]
    Line { line: usize, source: EngineError },

    #[error("line {line}: invalid input: {source}")]
    Input {
        line: usize,
        source: serde_json::Error,
    },

    #[error("render: {0}")]
    Render(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
