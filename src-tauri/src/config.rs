use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager};

const CONFIG_FILE: &str = "settings.json";
const DEFAULT_GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry document to load instead of the built-in catalog.
    pub registry_file: Option<PathBuf>,
    /// Directory icon references are resolved against. Defaults to `<resources>/res`.
    pub icon_dir: Option<PathBuf>,
    pub grid_columns: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry_file: None,
            icon_dir: None,
            grid_columns: DEFAULT_GRID_COLUMNS,
        }
    }
}

impl AppConfig {
    pub fn load(handle: &AppHandle) -> Self {
        let Some(dir) = config_dir(handle) else {
            return Self::default();
        };

        let _ = fs::create_dir_all(&dir);
        Self::load_from(&dir.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!("ignoring invalid settings {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

pub fn config_dir(handle: &AppHandle) -> Option<PathBuf> {
    handle.path().app_config_dir().ok()
}
