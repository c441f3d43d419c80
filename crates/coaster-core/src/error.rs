use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoasterError {
    #[error("Spline error: {0}")]
    Spline(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, CoasterError>;
