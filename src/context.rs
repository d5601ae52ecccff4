use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::capture::session::CaptureSession;
use crate::display::slots::DisplaySlots;
use crate::processing::client::FilterClient;
use crate::settings::store::SettingsStore;

/// Everything the command handlers touch, held in one explicit context.
///
/// Managed by Tauri and injected into each command instead of being
/// looked up from ambient scope.
pub struct AppContext {
    /// Live camera stream, opened once at startup.
    pub camera: CaptureSession,
    /// HTTP client for the filter service.
    pub client: FilterClient,
    /// The six display slots and the stale-response guard.
    pub display: DisplaySlots,
    /// Persisted settings (endpoint, JPEG quality).
    pub settings: Arc<SettingsStore>,
    /// File behind the current upload; forgotten on clear.
    selected_file: Mutex<Option<PathBuf>>,
}

impl AppContext {
    pub fn new(camera: CaptureSession, client: FilterClient, settings: Arc<SettingsStore>) -> Self {
        Self {
            camera,
            client,
            display: DisplaySlots::new(),
            settings,
            selected_file: Mutex::new(None),
        }
    }

    /// Remember (or forget) the file behind the current upload.
    pub fn set_selected_file(&self, path: Option<PathBuf>) {
        *self.selected_file.lock() = path;
    }

    /// The currently remembered upload file, if any.
    pub fn selected_file(&self) -> Option<PathBuf> {
        self.selected_file.lock().clone()
    }
}
