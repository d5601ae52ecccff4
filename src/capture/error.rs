use thiserror::Error;

/// Capture subsystem errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera unavailable: {0}")]
    Permission(String),

    #[error("no frame buffered yet")]
    NotReady,

    #[error("encoded payload implausibly small: {0} chars")]
    PayloadTooSmall(usize),

    #[error("could not read file: {0}")]
    FileRead(String),

    #[error("stream failed: {0}")]
    Stream(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CaptureError>;
