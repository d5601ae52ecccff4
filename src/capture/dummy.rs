use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::capture::backend::{CameraBackend, StreamFormat, FALLBACK_HEIGHT, FALLBACK_WIDTH};
use crate::capture::error::Result;
use crate::capture::session::{Frame, FrameBuffer};

const FRAME_INTERVAL: std::time::Duration = std::time::Duration::from_millis(33);

/// A simulated camera for testing without real hardware.
///
/// Produces a 320x240 RGB gradient at roughly 30 fps. Enable via the
/// `DUMMY_CAMERA=1` environment variable.
pub struct DummyCamera;

impl DummyCamera {
    pub fn new() -> Self {
        Self
    }

    /// Whether the dummy camera is enabled via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("DUMMY_CAMERA").is_ok_and(|v| v == "1" || v == "true")
    }

    /// Synthetic RGB gradient frame at the given size.
    pub fn gradient_frame(width: u32, height: u32, timestamp_us: u64) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push((x % 256) as u8); // R
                data.push((y % 256) as u8); // G
                data.push(128); // B
            }
        }
        Frame {
            data,
            width,
            height,
            timestamp_us,
        }
    }
}

impl Default for DummyCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for DummyCamera {
    fn name(&self) -> &str {
        "Simulated Camera"
    }

    fn format(&self) -> Option<StreamFormat> {
        Some(StreamFormat::fallback())
    }

    fn run(
        &self,
        buffer: Arc<FrameBuffer>,
        running: Arc<AtomicBool>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        let start = Instant::now();
        running.store(true, Ordering::Relaxed);
        while !shutdown.load(Ordering::Relaxed) {
            let timestamp_us = start.elapsed().as_micros() as u64;
            buffer.push(Self::gradient_frame(
                FALLBACK_WIDTH,
                FALLBACK_HEIGHT,
                timestamp_us,
            ));
            std::thread::sleep(FRAME_INTERVAL);
        }
        Ok(())
    }
}
