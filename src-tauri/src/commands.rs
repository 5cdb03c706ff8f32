use tauri::{AppHandle, Emitter, State};

use crate::{
    config::AppConfig,
    launch,
    state::AppState,
    tree::NodeId,
    view::{LauncherView, SelectionView},
};

pub const SELECTION_CHANGED_EVENT: &str = "selection_changed";

#[tauri::command]
pub fn get_view(state: State<'_, AppState>) -> Result<LauncherView, String> {
    let session = state
        .session
        .lock()
        .map_err(|_| "failed to lock session".to_string())?;
    Ok(state.view(&session))
}

#[tauri::command]
pub fn select_node(
    id: NodeId,
    app_handle: AppHandle,
    state: State<'_, AppState>,
) -> Result<SelectionView, String> {
    let view = {
        let mut session = state
            .session
            .lock()
            .map_err(|_| "failed to lock session".to_string())?;
        if !session.click(id) {
            log::warn!("click on {id:?} ignored");
        }
        session.selection_view()
    };

    let _ = app_handle.emit(SELECTION_CHANGED_EVENT, &view);
    Ok(view)
}

#[tauri::command]
pub fn launch_application(index: usize, state: State<'_, AppState>) {
    let Some(app) = state.registry.apps.get(index) else {
        log::warn!("no application at index {index}");
        return;
    };
    launch::on_launch_clicked(state.spawner.as_ref(), app);
}

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> AppConfig {
    state.config.clone()
}
