//! Mobile slot commands.

use std::path::Path;

use crate::cli::MobileCommands;
use crate::error::CliError;
use crate::util::{open_store, report};

use super::dnd::cmd_mobile_drop;

/// Dispatch a mobile subcommand.
pub fn cmd_mobile(config_path: Option<&Path>, subcmd: MobileCommands) -> Result<(), CliError> {
    if let MobileCommands::Drop { slot, target } = subcmd {
        return cmd_mobile_drop(config_path, slot, &target);
    }

    let mut store = open_store(config_path)?;
    let changed = match subcmd {
        MobileCommands::Show => {
            for (slot, panel) in store.mobile_panels().as_slice().iter().enumerate() {
                println!("{slot}: {panel}");
            }
            return Ok(());
        }
        MobileCommands::Open { panel, position } => {
            store.open_mobile_panel(&panel, position.into())
        }
        MobileCommands::Close { panel } => store.close_mobile_panel(&panel),
        MobileCommands::Select { slot, panel } => {
            if slot >= store.mobile_panels().len() {
                return Err(CliError::SlotNotFound(slot));
            }
            store.select_mobile_tab(slot, &panel)
        }
        MobileCommands::Split => store.split_mobile(),
        MobileCommands::Swap => store.swap_mobile_slots(0, 1),
        MobileCommands::Drop { .. } => false,
    };
    report(changed, &format!("Mobile slots: {}", store.mobile_panels()));
    Ok(())
}
