//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};

use paneldeck_core::layout::{LayoutNode, NodeId, PanelId};
use paneldeck_core::settings::{LayoutSettings, default_config_dir};
use paneldeck_core::store::{FileStorage, LayoutStore};

use crate::error::CliError;

/// The store every command works on.
pub type Store = LayoutStore<FileStorage>;

/// Resolves the configuration directory from CLI args, falling back to the
/// platform default.
pub fn config_dir(config_path: Option<&Path>) -> PathBuf {
    config_path.map_or_else(default_config_dir, Path::to_path_buf)
}

/// Opens the layout store in the configuration directory.
pub fn open_store(config_path: Option<&Path>) -> Result<Store, CliError> {
    let dir = config_dir(config_path);
    let settings = LayoutSettings::load_from_dir(&dir)?;
    tracing::debug!(dir = %dir.display(), "opening layout store");
    Ok(LayoutStore::load(FileStorage::new(dir), settings))
}

/// Checks that a panel is in the layout.
pub fn require_panel(layout: &LayoutNode, panel: &PanelId) -> Result<(), CliError> {
    if layout.contains_panel(panel) {
        Ok(())
    } else {
        Err(CliError::PanelNotFound(panel.to_string()))
    }
}

/// Checks that a node id names a node of the layout.
pub fn require_node(layout: &LayoutNode, node: &str) -> Result<NodeId, CliError> {
    let id = NodeId::from(node);
    if layout.find_node(&id).is_some() {
        Ok(id)
    } else {
        Err(CliError::NodeNotFound(node.to_string()))
    }
}

/// Prints the outcome of a layout action.
pub fn report(changed: bool, what: &str) {
    if changed {
        println!("{what}");
    } else {
        println!("Layout unchanged");
    }
}
