use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostbackError {
    /// The underlying store could not be opened, read or written.
    #[error("persistence failed: {message}")]
    Persistence { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl PostbackError {
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence {
            message: err.to_string(),
        }
    }
}
