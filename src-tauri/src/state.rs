use std::sync::{Arc, Mutex};

use crate::{
    config::AppConfig,
    icons::IconLoader,
    launch::{ProcessSpawner, SystemSpawner},
    registry::Registry,
    selection::SelectionState,
    tree::{self, NavTree, NodeId},
    view::{self, AppTile, LauncherView, SelectionView, HEADER},
};

/// Per-window UI state: the rendered navigation tree and its selection.
#[derive(Debug, Clone)]
pub struct Session {
    tree: NavTree,
    selection: SelectionState,
}

impl Session {
    pub fn new(registry: &Registry) -> Self {
        let mut tree = NavTree::new();
        tree::build(&registry.projects, &mut tree, None);
        Self {
            tree,
            selection: SelectionState::new(),
        }
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn click(&mut self, node: NodeId) -> bool {
        self.selection.on_node_clicked(&mut self.tree, node)
    }

    pub fn selection_view(&self) -> SelectionView {
        SelectionView::from(&self.selection)
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub registry: Arc<Registry>,
    pub tiles: Vec<AppTile>,
    pub session: Mutex<Session>,
    pub spawner: Arc<dyn ProcessSpawner>,
}

impl AppState {
    pub fn new(config: AppConfig, registry: Registry, icons: &IconLoader) -> Self {
        Self::with_spawner(config, registry, icons, Arc::new(SystemSpawner))
    }

    pub fn with_spawner(
        config: AppConfig,
        registry: Registry,
        icons: &IconLoader,
        spawner: Arc<dyn ProcessSpawner>,
    ) -> Self {
        let tiles = view::app_tiles(&registry, icons, config.grid_columns);
        let session = Session::new(&registry);
        Self {
            config,
            registry: Arc::new(registry),
            tiles,
            session: Mutex::new(session),
            spawner,
        }
    }

    pub fn view(&self, session: &Session) -> LauncherView {
        LauncherView {
            header: HEADER.to_string(),
            selection: session.selection_view(),
            apps: self.tiles.clone(),
            tree: session.tree().clone(),
        }
    }
}
