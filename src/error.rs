use std::fmt::Display;

/// Failures reported by the note store.
///
/// `OpenFailed` is fatal for the session: the store does not try to reopen
/// itself. Write and read failures are reported once and never retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open note store: {0}")]
    OpenFailed(String),

    #[error("failed to write note: {0}")]
    WriteFailed(String),

    #[error("failed to read notes: {0}")]
    ReadFailed(String),

    #[error("invalid note: {0}")]
    InvalidNote(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn open(err: impl Display) -> Self {
        Self::OpenFailed(err.to_string())
    }

    pub fn write(err: impl Display) -> Self {
        Self::WriteFailed(err.to_string())
    }

    pub fn read(err: impl Display) -> Self {
        Self::ReadFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
