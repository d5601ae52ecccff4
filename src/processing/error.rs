use thiserror::Error;

/// Errors from the exchange with the remote filter service.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The service answered with a structured `{"error": …}` body.
    #[error("server reported: {0}")]
    Server(String),

    /// The request could not complete, or the body was not parseable.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, ProcessingError>;
