use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde::Serialize;

use crate::capture::error::Result;
use crate::capture::session::FrameBuffer;

/// Frame size used when a backend cannot report its native format.
pub const FALLBACK_WIDTH: u32 = 320;
pub const FALLBACK_HEIGHT: u32 = 240;

/// Stream format reported by an opened camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFormat {
    pub width: u32,
    pub height: u32,
    pub fps: f32,
}

impl StreamFormat {
    /// The 320x240 format assumed when the device reports none.
    pub fn fallback() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            fps: 30.0,
        }
    }
}

/// Platform-agnostic camera backend trait.
///
/// Implemented per-platform behind this seam. A backend that cannot
/// report a native format must deliver frames at [`StreamFormat::fallback`]
/// dimensions.
pub trait CameraBackend: Send + Sync {
    /// Human-readable device name.
    fn name(&self) -> &str;

    /// Native stream format, if the device reports one.
    fn format(&self) -> Option<StreamFormat>;

    /// Deliver frames into `buffer` until `shutdown` is set.
    ///
    /// Runs on the capture thread and blocks for the lifetime of the
    /// stream. Must set `running` once the stream is live.
    fn run(
        &self,
        buffer: Arc<FrameBuffer>,
        running: Arc<AtomicBool>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()>;
}
