use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Cannot compute {0} over zero rows")]
    EmptyInput(String),

    #[error("Global coverage median is zero, normalized coverage is undefined")]
    DivisionByZero,

    #[error("Window size must be greater than zero, got {0}")]
    InvalidWindowSize(u32),

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoverageError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CoverageError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoverageError>;
