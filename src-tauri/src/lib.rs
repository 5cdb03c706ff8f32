mod commands;
pub mod config;
pub mod icons;
pub mod launch;
pub mod models;
pub mod registry;
pub mod selection;
pub mod state;
pub mod tree;
pub mod view;

use commands::{get_settings, get_view, launch_application, select_node};
use config::AppConfig;
use icons::IconLoader;
use registry::Registry;
use state::AppState;
use tauri::{AppHandle, Manager, WebviewWindowBuilder};
use tauri_plugin_log::{Target, TargetKind};

const MAIN_WINDOW_LABEL: &str = "main";
const ICON_DIR: &str = "res";
const ICON_CACHE_DIR: &str = "icons";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            show_window(app_handle);
        }))
        .plugin(
            tauri_plugin_log::Builder::new()
                .targets([
                    Target::new(TargetKind::Stdout),
                    Target::new(TargetKind::LogDir { file_name: None }),
                    Target::new(TargetKind::Webview),
                ])
                .level(if cfg!(debug_assertions) {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                })
                .build(),
        )
        .invoke_handler(tauri::generate_handler![
            get_view,
            select_node,
            launch_application,
            get_settings
        ])
        .setup(|app| {
            let handle = app.handle();

            let config = AppConfig::load(handle);
            let registry = Registry::resolve(&config, config::config_dir(handle).as_deref())?;

            let icon_dir = config.icon_dir.clone().or_else(|| {
                handle
                    .path()
                    .resource_dir()
                    .ok()
                    .map(|dir| dir.join(ICON_DIR))
            });
            let cache_dir = handle
                .path()
                .app_cache_dir()
                .ok()
                .map(|dir| dir.join(ICON_CACHE_DIR));
            let icons = IconLoader::new(icon_dir, cache_dir);

            app.manage(AppState::new(config, registry, &icons));

            // The window is declared with `create: false` so the webview never
            // queries state before it is managed.
            if let Some(window_config) = app
                .config()
                .app
                .windows
                .iter()
                .find(|window| window.label == MAIN_WINDOW_LABEL)
                .cloned()
            {
                WebviewWindowBuilder::from_config(handle, &window_config)?.build()?;
            }

            log::info!("launcher ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn show_window(app_handle: &AppHandle) {
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.show();
        let _ = window.unminimize();
        let _ = window.set_focus();
    }
}
