use std::fmt;

/// Why a value could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsigned input beyond the signed 64-bit range of `Value::Integer`.
    Overflow,
    /// Kind outside the supported set.
    Unsupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Overflow => f.write_str("overflow"),
            ErrorKind::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Conversion failure — terminal for the single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConvertError {
    pub fn overflow() -> Self {
        Self {
            kind: ErrorKind::Overflow,
            message: "u64 values with high bit set are not supported".to_string(),
        }
    }

    pub fn unsupported(kind_name: &str) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            message: format!("unsupported type: {kind_name}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConvertError {}
