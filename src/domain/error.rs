use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("No item selected, please select an item")]
    NoSelection,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(String),
}
