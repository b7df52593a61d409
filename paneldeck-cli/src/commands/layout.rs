//! Layout tree commands: split, merge, edge moves, tabs, resizing and
//! visibility.

use std::path::Path;

use paneldeck_core::layout::{PanelId, Side};

use crate::error::CliError;
use crate::util::{open_store, report, require_node, require_panel};

/// Split command handler
pub fn cmd_split(
    config_path: Option<&Path>,
    panel: &PanelId,
    target: &str,
    side: Side,
) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    require_panel(store.layout(), panel)?;
    let target = require_node(store.layout(), target)?;
    let changed = store.split_panel(panel, &target, side);
    report(changed, &format!("Split {panel} to the {side} of {target}"));
    Ok(())
}

/// Merge command handler
pub fn cmd_merge(
    config_path: Option<&Path>,
    panel: &PanelId,
    target: &str,
    index: Option<usize>,
) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    require_panel(store.layout(), panel)?;
    let target = require_node(store.layout(), target)?;
    let changed = match index {
        Some(index) => store.merge_panels_at(panel, &target, index),
        None => store.merge_panels(panel, &target),
    };
    report(changed, &format!("Merged {panel} into {target}"));
    Ok(())
}

/// Edge command handler
pub fn cmd_edge(config_path: Option<&Path>, panel: &PanelId, side: Side) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    require_panel(store.layout(), panel)?;
    let changed = store.move_panel_to_edge(panel, side);
    report(changed, &format!("Moved {panel} to the {side} edge"));
    Ok(())
}

/// Activate command handler
pub fn cmd_activate(config_path: Option<&Path>, panel: &PanelId) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    let node = store
        .layout()
        .find_panel_node(panel)
        .map(|node| node.id.clone())
        .ok_or_else(|| CliError::PanelNotFound(panel.to_string()))?;
    let changed = store.set_node_active_tab(&node, panel);
    report(changed, &format!("Activated {panel} in {node}"));
    Ok(())
}

/// Move-tab command handler
pub fn cmd_move_tab(
    config_path: Option<&Path>,
    node: &str,
    from: usize,
    to: usize,
) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    let node = require_node(store.layout(), node)?;
    let changed = store.move_tab(&node, from, to);
    report(changed, &format!("Moved tab {from} of {node} to {to}"));
    Ok(())
}

/// Resize command handler
pub fn cmd_resize(config_path: Option<&Path>, group: &str, sizes: &[f64]) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    let group = require_node(store.layout(), group)?;
    let children = store
        .layout()
        .find_node(&group)
        .and_then(|node| node.as_group())
        .map(|group| group.children.len())
        .ok_or_else(|| CliError::InvalidArgument(format!("{group} is not a group")))?;
    if children != sizes.len() {
        return Err(CliError::InvalidArgument(format!(
            "{group} has {children} children, got {} sizes",
            sizes.len()
        )));
    }
    let changed = store.update_sizes(&group, sizes);
    report(changed, &format!("Resized {group}"));
    Ok(())
}

/// Toggle command handler
pub fn cmd_toggle(config_path: Option<&Path>, panel: &PanelId) -> Result<(), CliError> {
    let base = panel.as_base().ok_or_else(|| {
        CliError::InvalidArgument(format!("{panel} is not a built-in panel"))
    })?;
    let mut store = open_store(config_path)?;
    store.toggle_visibility(base);
    let state = if store.visibility().get(base) {
        "shown"
    } else {
        "hidden"
    };
    println!("{panel} {state}");
    Ok(())
}

/// Reset command handler
pub fn cmd_reset(config_path: Option<&Path>) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    let changed = store.reset_layout();
    report(changed, "Layout reset to defaults");
    Ok(())
}
