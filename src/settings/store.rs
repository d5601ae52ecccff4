use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::settings::types::SettingsFile;

/// Persistent settings store with debounced saving.
pub struct SettingsStore {
    path: PathBuf,
    data: Mutex<SettingsFile>,
    save_notify: Notify,
    is_dirty: AtomicBool,
}

impl SettingsStore {
    /// Create a new store, loading from disk if the file exists.
    pub fn new(path: PathBuf) -> Self {
        let data = Self::load(&path).unwrap_or_default();
        Self {
            path,
            data: Mutex::new(data),
            save_notify: Notify::new(),
            is_dirty: AtomicBool::new(false),
        }
    }

    /// Load settings from a JSON file, returning default on missing file.
    pub fn load(path: &std::path::Path) -> Result<SettingsFile, String> {
        if !path.exists() {
            return Ok(SettingsFile::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    }

    /// Save current settings to disk atomically (write .tmp then rename).
    pub fn save(&self) -> Result<(), String> {
        let data = self.data.lock().clone();
        let json = serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| e.to_string())?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| e.to_string())?;

        Ok(())
    }

    /// Current filter service base URL.
    pub fn endpoint(&self) -> String {
        self.data.lock().endpoint.clone()
    }

    /// Current JPEG quality for camera stills.
    pub fn jpeg_quality(&self) -> u8 {
        self.data.lock().jpeg_quality
    }

    /// Full settings snapshot.
    pub fn snapshot(&self) -> SettingsFile {
        self.data.lock().clone()
    }

    /// Point the client at a different filter service.
    /// Triggers a debounced save.
    pub fn set_endpoint(&self, endpoint: String) {
        self.data.lock().endpoint = endpoint;
        self.mark_dirty();
    }

    /// Set the still-encoding quality, clamped to 1-100.
    /// Triggers a debounced save.
    pub fn set_jpeg_quality(&self, quality: u8) {
        self.data.lock().jpeg_quality = quality.clamp(1, 100);
        self.mark_dirty();
    }

    fn mark_dirty(&self) {
        self.is_dirty.store(true, Ordering::Release);
        self.save_notify.notify_one();
    }

    /// Start the debounce task — waits for dirty notification, sleeps 500ms, then saves.
    ///
    /// Uses an `AtomicBool` dirty flag to avoid losing notifications that arrive
    /// between `save()` completing and `notified().await` re-registering.
    pub fn start_debounce_task(self: &Arc<Self>) {
        let store = Arc::clone(self);
        tauri::async_runtime::spawn(async move {
            loop {
                store.save_notify.notified().await;
                tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                if store.is_dirty.swap(false, Ordering::AcqRel) {
                    if let Err(e) = store.save() {
                        tracing::warn!("Failed to save settings: {e}");
                    }
                }
            }
        });
    }
}
