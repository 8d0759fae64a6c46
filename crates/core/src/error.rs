use crate::status::FeedbackStatus;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{what} schema mismatch at {path}: {message}")]
    Parse {
        what: &'static str,
        path: String,
        message: String,
    },
    #[error("unsupported file extension for {} (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: std::path::PathBuf },
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to generate spreadsheet: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
    #[error("feedback cannot move from {from} to {to}")]
    InvalidTransition {
        from: FeedbackStatus,
        to: FeedbackStatus,
    },
    #[error("forbidden: {0}")]
    Forbidden(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
