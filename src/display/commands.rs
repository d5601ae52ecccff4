use tauri::State;

use crate::context::AppContext;
use crate::display::slots::DisplayState;
use crate::error::UserNotice;

/// Current contents of the six display slots.
#[tauri::command]
pub async fn get_display(ctx: State<'_, AppContext>) -> Result<DisplayState, UserNotice> {
    Ok(ctx.display.state())
}

/// Empty all six slots, forget the selected upload file, and confirm.
#[tauri::command]
pub async fn clear_display(ctx: State<'_, AppContext>) -> Result<UserNotice, UserNotice> {
    ctx.display.clear();
    ctx.set_selected_file(None);
    tracing::info!("display cleared");
    Ok(UserNotice::cleared())
}
