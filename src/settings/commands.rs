use tauri::State;

use crate::context::AppContext;
use crate::settings::types::SettingsFile;

/// Current settings snapshot.
#[tauri::command]
pub async fn get_settings(ctx: State<'_, AppContext>) -> Result<SettingsFile, String> {
    Ok(ctx.settings.snapshot())
}

/// Point the client at a different filter service.
#[tauri::command]
pub async fn set_endpoint(ctx: State<'_, AppContext>, endpoint: String) -> Result<(), String> {
    let endpoint = endpoint.trim().to_string();
    if endpoint.is_empty() {
        return Err("endpoint must not be empty".to_string());
    }
    ctx.settings.set_endpoint(endpoint);
    Ok(())
}

/// Set the JPEG quality used for camera stills (clamped to 1-100).
#[tauri::command]
pub async fn set_jpeg_quality(ctx: State<'_, AppContext>, quality: u8) -> Result<u8, String> {
    ctx.settings.set_jpeg_quality(quality);
    Ok(ctx.settings.jpeg_quality())
}
