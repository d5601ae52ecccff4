use serde::Serialize;

use crate::capture::error::CaptureError;
use crate::processing::error::ProcessingError;

/// Kind discriminant for user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Permission,
    NotReady,
    CaptureFailed,
    FileRead,
    Server,
    Transport,
    Cleared,
}

/// A blocking, user-facing notification.
///
/// The only channel for communicating failure to the user: every error is
/// converted into a notice at the boundary where it is detected, and the
/// frontend surfaces it as a blocking alert. Each kind carries its own
/// symbolic prefix so notices are scannable at a glance. Nothing is
/// retried; the next user action starts a fresh attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotice {
    pub kind: NoticeKind,
    pub message: String,
}

impl UserNotice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Confirmation shown after a successful clear.
    pub fn cleared() -> Self {
        Self::new(NoticeKind::Cleared, "🧹 All images cleared!")
    }
}

impl From<CaptureError> for UserNotice {
    fn from(error: CaptureError) -> Self {
        match error {
            CaptureError::Permission(cause) => Self::new(
                NoticeKind::Permission,
                format!(
                    "⚠️ Error accessing camera: {cause}. Please allow camera access in your system settings."
                ),
            ),
            CaptureError::NotReady => Self::new(
                NoticeKind::NotReady,
                "📷 Camera not ready yet! Please wait a few seconds.",
            ),
            CaptureError::PayloadTooSmall(_) | CaptureError::Stream(_) => Self::new(
                NoticeKind::CaptureFailed,
                "⚠️ Failed to capture image. Please try again.",
            ),
            CaptureError::FileRead(cause) => Self::new(
                NoticeKind::FileRead,
                format!("⚠️ Could not read the selected file: {cause}"),
            ),
        }
    }
}

impl From<ProcessingError> for UserNotice {
    fn from(error: ProcessingError) -> Self {
        match error {
            ProcessingError::Server(message) => {
                Self::new(NoticeKind::Server, format!("⚠️ Server error: {message}"))
            }
            ProcessingError::Transport(_) => Self::new(
                NoticeKind::Transport,
                "❌ Something went wrong while sending the image to the server.",
            ),
        }
    }
}
