use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The persisted document could not be read, parsed or written.
    /// Carries the underlying message verbatim.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(err: impl Display) -> Self { Self::Storage(err.to_string()) }
}
