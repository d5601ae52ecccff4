use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::{error, info};

use crate::capture::backend::CameraBackend;

/// Callback for reporting stream failures to the frontend.
/// Argument: error message.
pub type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// A single captured frame from the camera.
pub struct Frame {
    /// Raw pixel data (RGB).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in microseconds.
    pub timestamp_us: u64,
}

/// Ring buffer state guarded by a single lock.
struct Ring {
    frames: Vec<Option<Arc<Frame>>>,
    write_idx: usize,
}

/// Thread-safe ring buffer for camera frames.
///
/// Stores up to `capacity` frames, overwriting the oldest when full.
/// Frames are wrapped in `Arc` so consumers get a cheap reference-counted
/// pointer instead of cloning multi-megabyte pixel buffers.
pub struct FrameBuffer {
    ring: Mutex<Ring>,
    capacity: usize,
    /// Monotonic counter incremented on each push — a non-zero value means
    /// the stream has buffered at least one frame.
    sequence: AtomicU64,
}

impl FrameBuffer {
    /// Create a new ring buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(Ring {
                frames: (0..capacity).map(|_| None).collect(),
                write_idx: 0,
            }),
            capacity,
            sequence: AtomicU64::new(0),
        }
    }

    /// Push a new frame, overwriting the oldest if full.
    pub fn push(&self, frame: Frame) {
        let mut ring = self.ring.lock();
        let idx = ring.write_idx;
        ring.frames[idx] = Some(Arc::new(frame));
        ring.write_idx = (idx + 1) % self.capacity;
        self.sequence.fetch_add(1, Ordering::Relaxed);
    }

    /// Total number of frames pushed so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Get the most recently pushed frame, if any.
    pub fn latest(&self) -> Option<Arc<Frame>> {
        if self.capacity == 0 {
            return None;
        }
        let ring = self.ring.lock();
        let latest_idx = if ring.write_idx == 0 {
            self.capacity - 1
        } else {
            ring.write_idx - 1
        };
        ring.frames[latest_idx].clone()
    }
}

/// Configuration for the startup watchdog timer.
struct WatchdogConfig {
    /// Maximum time to wait for the backend to set `running = true`.
    startup_timeout: std::time::Duration,
    /// Time to wait for the first frame after the stream is running.
    frame_timeout: std::time::Duration,
    /// Poll interval for the watchdog thread.
    poll_interval: std::time::Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            startup_timeout: std::time::Duration::from_secs(30),
            frame_timeout: std::time::Duration::from_secs(5),
            poll_interval: std::time::Duration::from_millis(250),
        }
    }
}

/// Live camera stream for the lifetime of the application.
///
/// Owns the producer thread driving a [`CameraBackend`] and a watchdog
/// that reports a camera which never delivers a frame. Opened once at
/// startup and never reopened.
pub struct CaptureSession {
    buffer: Arc<FrameBuffer>,
    running: Arc<AtomicBool>,
    /// Signals the producer and watchdog to exit during teardown.
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    watchdog: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Open the stream: spawn the producer thread for `backend` plus the
    /// startup watchdog.
    ///
    /// If `on_error` is provided it is called with an error message when
    /// the backend fails or the camera produces no frames, so the caller
    /// can surface the failure to the frontend. Each cause fires at most
    /// once.
    pub fn open(backend: Arc<dyn CameraBackend>, on_error: Option<ErrorCallback>) -> Self {
        let buffer = Arc::new(FrameBuffer::new(3));
        let running = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(AtomicBool::new(false));

        // Clone on_error for the watchdog — the producer gets the original
        let on_error_wd = on_error.clone();

        let thread = {
            let buffer = Arc::clone(&buffer);
            let running = Arc::clone(&running);
            let shutdown = Arc::clone(&shutdown);

            Some(
                std::thread::Builder::new()
                    .name("camera-producer".to_string())
                    .spawn(move || {
                        info!("camera stream starting: {}", backend.name());
                        if let Err(e) = backend.run(buffer, Arc::clone(&running), shutdown) {
                            error!("camera stream failed: {e}");
                            running.store(false, Ordering::Relaxed);
                            if let Some(cb) = &on_error {
                                cb(&e.to_string());
                            }
                        }
                        info!("camera stream exiting");
                    })
                    .expect("failed to spawn camera producer thread"),
            )
        };

        let watchdog = {
            let buffer = Arc::clone(&buffer);
            let running = Arc::clone(&running);
            let shutdown = Arc::clone(&shutdown);

            Some(
                std::thread::Builder::new()
                    .name("camera-watchdog".to_string())
                    .spawn(move || {
                        run_watchdog(
                            &buffer,
                            &running,
                            &shutdown,
                            on_error_wd.as_ref(),
                            WatchdogConfig::default(),
                        );
                    })
                    .expect("failed to spawn camera watchdog thread"),
            )
        };

        Self {
            buffer,
            running,
            shutdown,
            thread,
            watchdog,
        }
    }

    /// Whether the stream has buffered at least one frame.
    pub fn is_ready(&self) -> bool {
        self.buffer.sequence() > 0
    }

    /// Whether the stream is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// The most recent frame, if any.
    pub fn latest_frame(&self) -> Option<Arc<Frame>> {
        self.buffer.latest()
    }

    /// Stop the stream. Idempotent — calling stop twice does not panic.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.watchdog.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Waits for the stream to start running, then checks that a first frame
/// arrives within `frame_timeout`. Fires `on_error` and clears `running`
/// if the camera produces nothing.
fn run_watchdog(
    buffer: &FrameBuffer,
    running: &AtomicBool,
    shutdown: &AtomicBool,
    on_error: Option<&ErrorCallback>,
    config: WatchdogConfig,
) {
    let WatchdogConfig {
        startup_timeout,
        frame_timeout,
        poll_interval,
    } = config;

    // Phase 1: wait for `running` (backend startup)
    let start = std::time::Instant::now();
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        if running.load(Ordering::Relaxed) {
            break;
        }
        if start.elapsed() >= startup_timeout {
            // Stream never started — the producer reports its own error
            return;
        }
        std::thread::sleep(poll_interval);
    }

    // Phase 2: wait for at least one frame within frame_timeout
    let deadline = std::time::Instant::now() + frame_timeout;
    loop {
        if shutdown.load(Ordering::Relaxed) || !running.load(Ordering::Relaxed) {
            return;
        }
        if buffer.sequence() > 0 {
            // Frames are arriving — camera is healthy
            return;
        }
        if std::time::Instant::now() >= deadline {
            tracing::warn!(
                "watchdog: no frames received within {}s",
                frame_timeout.as_secs()
            );
            if let Some(cb) = on_error {
                cb(&format!(
                    "camera produces no frames ({}s timeout)",
                    frame_timeout.as_secs()
                ));
            }
            running.store(false, Ordering::Relaxed);
            return;
        }
        std::thread::sleep(poll_interval);
    }
}
