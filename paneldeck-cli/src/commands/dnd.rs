//! Drop simulation commands.

use std::path::Path;

use paneldeck_core::dnd::{
    DropTarget, handle_drag_end, handle_drag_start, handle_mobile_drag_end,
};
use paneldeck_core::layout::PanelId;

use crate::error::CliError;
use crate::util::{Store, open_store, report, require_node, require_panel};

/// Drop command handler
pub fn cmd_drop(config_path: Option<&Path>, panel: &PanelId, target: &str) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    require_panel(store.layout(), panel)?;
    require_target_node(&store, target)?;

    handle_drag_start(&mut store, panel);
    let changed = handle_drag_end(&mut store, panel, Some(target));
    report(changed, &format!("Dropped {panel} on {target}"));
    Ok(())
}

/// Mobile drop command handler
pub fn cmd_mobile_drop(
    config_path: Option<&Path>,
    slot: usize,
    target: &str,
) -> Result<(), CliError> {
    let mut store = open_store(config_path)?;
    if slot >= store.mobile_panels().len() {
        return Err(CliError::SlotNotFound(slot));
    }
    parse_target(target)?;
    let changed = handle_mobile_drag_end(&mut store, slot, Some(target));
    report(changed, &format!("Mobile slots: {}", store.mobile_panels()));
    Ok(())
}

fn parse_target(target: &str) -> Result<DropTarget, CliError> {
    target
        .parse()
        .map_err(|e: paneldeck_core::dnd::UnknownTarget| CliError::InvalidArgument(e.to_string()))
}

/// Rejects targets naming a node that is not in the layout.
fn require_target_node(store: &Store, target: &str) -> Result<(), CliError> {
    match parse_target(target)? {
        DropTarget::Split { node, .. }
        | DropTarget::Merge { node }
        | DropTarget::Tab { node, .. } => {
            require_node(store.layout(), node.as_str())?;
        }
        DropTarget::Edge(_) | DropTarget::MobileSlot(_) => {}
    }
    Ok(())
}
