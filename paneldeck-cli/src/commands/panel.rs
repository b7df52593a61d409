//! Panel commands: detached panels and the context menu.

use std::path::Path;

use paneldeck_core::layout::PanelId;
use paneldeck_core::panels::{
    EmptyRegistry, PanelCatalog, PanelContentProvider, PanelMenuAction, menu_actions,
};

use crate::error::CliError;
use crate::util::{open_store, report, require_node, require_panel};

/// Open command handler
pub fn cmd_open(
    config_path: Option<&Path>,
    panel: &PanelId,
    target: Option<&str>,
) -> Result<(), CliError> {
    if !panel.is_detached() {
        return Err(CliError::InvalidArgument(format!(
            "{panel} is a built-in panel; use `toggle` to show it"
        )));
    }
    let mut store = open_store(config_path)?;
    let target = target
        .map(|node| require_node(store.layout(), node))
        .transpose()?;
    let changed = store.open_detached_panel(panel, target.as_ref());
    report(changed, &format!("Opened {panel}"));
    Ok(())
}

/// Close command handler
pub fn cmd_close(config_path: Option<&Path>, panel: &PanelId) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    if panel.is_detached() {
        require_panel(store.layout(), panel)?;
    }
    let changed = store.close_panel(panel);
    report(changed, &format!("Closed {panel}"));
    Ok(())
}

/// Menu command handler: lists the actions, or runs one.
pub fn cmd_menu(
    config_path: Option<&Path>,
    panel: &PanelId,
    action: Option<PanelMenuAction>,
) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    let node = store
        .layout()
        .find_panel_node(panel)
        .ok_or_else(|| CliError::PanelNotFound(panel.to_string()))?;
    let available = menu_actions(panel, node.panel_ids.len() > 1);

    let Some(action) = action else {
        let title = PanelCatalog::new(EmptyRegistry).descriptor(panel).title;
        for action in available {
            println!("{:<16} {}", action.as_str(), action.label(&title));
        }
        return Ok(());
    };
    if !available.contains(&action) {
        return Err(CliError::InvalidArgument(format!(
            "{action} is not available for {panel}"
        )));
    }
    let changed = store.apply_menu_action(panel, action);
    report(changed, &format!("Applied {action} to {panel}"));
    Ok(())
}
