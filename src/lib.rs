mod capture;
mod context;
mod display;
mod error;
mod processing;
mod settings;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tauri::{Emitter, Manager};

use capture::backend::{CameraBackend, StreamFormat};
use capture::commands::{camera_ready, capture_and_submit, preview_frame, submit_file};
use capture::dummy::DummyCamera;
use capture::error::CaptureError;
use capture::session::{CaptureSession, ErrorCallback, FrameBuffer};
use context::AppContext;
use display::commands::{clear_display, get_display};
use error::UserNotice;
use processing::client::FilterClient;
use settings::commands::{get_settings, set_endpoint, set_jpeg_quality};
use settings::store::SettingsStore;

/// Pick the camera backend for the current platform.
///
/// When `DUMMY_CAMERA=1` is set, a simulated camera is used instead.
fn create_backend() -> Arc<dyn CameraBackend> {
    if DummyCamera::is_enabled() {
        return Arc::new(DummyCamera::new());
    }
    Arc::new(NullCamera)
}

/// Backend used on platforms without a native camera integration.
struct NullCamera;

impl CameraBackend for NullCamera {
    fn name(&self) -> &str {
        "none"
    }

    fn format(&self) -> Option<StreamFormat> {
        None
    }

    fn run(
        &self,
        _buffer: Arc<FrameBuffer>,
        _running: Arc<AtomicBool>,
        _shutdown: Arc<AtomicBool>,
    ) -> capture::error::Result<()> {
        Err(CaptureError::Permission(
            "no camera backend available on this platform".to_string(),
        ))
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::new()
                        .targets([
                            tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
                            tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Webview),
                            tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::LogDir {
                                file_name: None,
                            }),
                        ])
                        .level(log::LevelFilter::Debug)
                        .build(),
                )?;
            }

            let settings_path = app
                .path()
                .app_data_dir()
                .expect("app data dir should be available")
                .join("filter-studio.json");
            let store = Arc::new(SettingsStore::new(settings_path));
            store.start_debounce_task();

            // Camera unavailability is reported once, at startup
            let handle = app.handle().clone();
            let on_error: ErrorCallback = Arc::new(move |message| {
                let notice = UserNotice::from(CaptureError::Permission(message.to_string()));
                if let Err(e) = handle.emit("camera-error", notice) {
                    tracing::warn!("failed to emit camera-error: {e}");
                }
            });
            let camera = CaptureSession::open(create_backend(), Some(on_error));
            let client = FilterClient::new()?;

            app.manage(AppContext::new(camera, client, store));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            capture_and_submit,
            submit_file,
            camera_ready,
            preview_frame,
            get_display,
            clear_display,
            get_settings,
            set_endpoint,
            set_jpeg_quality,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
