use tabula_api::ConvertError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("expected {expected} parameters, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("too many parameters: {got} exceeds limit of {max}")]
    TooManyParams { max: usize, got: usize },

    #[error("row has {got} values for {expected} columns")]
    ColumnCount { expected: usize, got: usize },
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Convert` variant, context is added to the inner `ConvertError`.
    /// For `Config`, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Convert(e) => EngineError::Convert(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}
