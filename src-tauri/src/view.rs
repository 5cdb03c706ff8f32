use serde::Serialize;

use crate::{
    icons::IconLoader,
    registry::Registry,
    selection::SelectionState,
    tree::{NavTree, NodeId},
};

pub const HEADER: &str = "Avalon Launcher";

/// One button of the application grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppTile {
    pub index: usize,
    pub label: String,
    /// Base64 PNG, empty when the icon could not be loaded.
    pub icon: String,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub label: String,
    pub selected: Option<NodeId>,
}

impl From<&SelectionState> for SelectionView {
    fn from(state: &SelectionState) -> Self {
        Self {
            label: state.label().to_string(),
            selected: state.current(),
        }
    }
}

/// Everything the webview needs to draw the launcher.
#[derive(Debug, Clone, Serialize)]
pub struct LauncherView {
    pub header: String,
    pub selection: SelectionView,
    pub apps: Vec<AppTile>,
    pub tree: NavTree,
}

/// Grid cell for the app at `index`, filling rows left to right.
pub fn grid_slot(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index / columns, index % columns)
}

pub fn app_tiles(registry: &Registry, icons: &IconLoader, columns: usize) -> Vec<AppTile> {
    registry
        .apps
        .iter()
        .enumerate()
        .map(|(index, app)| {
            let (row, column) = grid_slot(index, columns);
            AppTile {
                index,
                label: app.label.clone(),
                icon: icons.load(&app.icon).unwrap_or_default(),
                row,
                column,
            }
        })
        .collect()
}
