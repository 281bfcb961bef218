use thiserror::Error;

use crate::domain::Group;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient sample size: group {group} has {count} observation(s), at least 2 are required")]
    InsufficientSampleSize { group: Group, count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed dataset (line {line}): {message}")]
    MalformedDataset { line: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        CoreError::MalformedDataset {
            line,
            message: message.into(),
        }
    }

    /// Validation failures caused by the data or settings the user supplied,
    /// as opposed to environment failures such as unreadable files.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CoreError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CoreError::Io(io),
            _ => CoreError::malformed(line, message),
        }
    }
}
