use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::AppConfig,
    models::{ApplicationDescriptor, ProjectNode},
};

/// File name looked up in the app config dir when no explicit registry is configured.
pub const REGISTRY_FILE: &str = "registry.json";

const BUILTIN_REGISTRY: &str = include_str!("../resources/registry.json");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid registry document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Applications and the project catalog, read once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub apps: Vec<ApplicationDescriptor>,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectNode>,
}

impl Registry {
    /// The studio catalog compiled into the binary.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json_str(BUILTIN_REGISTRY)
    }

    pub fn from_json_str(content: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Picks the registry for this session: the configured file, then
    /// `registry.json` in the config dir, then the built-in catalog.
    pub fn resolve(config: &AppConfig, config_dir: Option<&Path>) -> Result<Self, RegistryError> {
        let candidate = config.registry_file.clone().or_else(|| {
            config_dir
                .map(|dir| dir.join(REGISTRY_FILE))
                .filter(|path| path.is_file())
        });

        if let Some(path) = candidate {
            match Self::load(&path) {
                Ok(registry) => {
                    info!(
                        "loaded registry from {} ({} apps, {} projects)",
                        path.display(),
                        registry.apps.len(),
                        registry.projects.len()
                    );
                    return Ok(registry);
                }
                Err(err) => warn!("{err}; falling back to the built-in registry"),
            }
        }

        debug!("using built-in registry");
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builtin_registry_matches_studio_catalog() {
        let registry = Registry::builtin().unwrap();

        let labels: Vec<_> = registry.apps.iter().map(|app| app.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Maya 2016", "Maya 2018", "NukeX 11v3", "Mari 2018", "Photoshop"]
        );
        assert_eq!(registry.apps[2].executable, "nuke");

        let projects: Vec<_> = registry.projects.keys().map(String::as_str).collect();
        assert_eq!(
            projects,
            ["Alita", "Batman Begins", "Batman Dark Knight", "Hulk", "Spiderman"]
        );

        let begins = registry.projects["Batman Begins"].children().unwrap();
        assert_eq!(begins["assets"].children().unwrap().len(), 4);
        assert_eq!(begins["shots"].children().unwrap().len(), 12);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let registry = Registry::from_json_str("{}").unwrap();
        assert!(registry.apps.is_empty());
        assert!(registry.projects.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }

    #[test]
    fn resolve_prefers_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(
            &path,
            r#"{"apps": [{"label": "Houdini", "exe": "houdini"}], "projects": {"Dune": null}}"#,
        )
        .unwrap();

        let config = AppConfig {
            registry_file: Some(path),
            ..AppConfig::default()
        };
        let registry = Registry::resolve(&config, None).unwrap();

        assert_eq!(registry.apps.len(), 1);
        assert_eq!(registry.apps[0].executable, "houdini");
        assert!(registry.projects["Dune"].is_leaf());
    }

    #[test]
    fn resolve_reads_registry_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REGISTRY_FILE),
            r#"{"projects": {"Dune": {"assets": {}, "shots": {}}}}"#,
        )
        .unwrap();

        let registry = Registry::resolve(&AppConfig::default(), Some(dir.path())).unwrap();
        assert!(registry.apps.is_empty());
        assert_eq!(registry.projects.len(), 1);
    }

    #[test]
    fn resolve_falls_back_to_builtin_on_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let config = AppConfig {
            registry_file: Some(path),
            ..AppConfig::default()
        };
        let registry = Registry::resolve(&config, Some(dir.path())).unwrap();
        assert_eq!(registry, Registry::builtin().unwrap());
    }

    #[test]
    fn resolve_without_any_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::resolve(&AppConfig::default(), Some(dir.path())).unwrap();
        assert_eq!(registry.apps.len(), 5);
    }
}
