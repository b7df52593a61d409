//! Command handler modules for the CLI.

mod completions;
mod dnd;
mod layout;
mod mobile;
mod panel;
mod show;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Show { format } => show::cmd_show(config_path, format),
        Commands::Render {
            width,
            height,
            format,
        } => show::cmd_render(config_path, width, height, format),
        Commands::Zones {
            dragging,
            width,
            height,
            at,
        } => show::cmd_zones(config_path, &dragging, width, height, at),
        Commands::Split {
            panel,
            target,
            side,
        } => layout::cmd_split(config_path, &panel, &target, side.into()),
        Commands::Merge {
            panel,
            target,
            index,
        } => layout::cmd_merge(config_path, &panel, &target, index),
        Commands::Edge { panel, side } => layout::cmd_edge(config_path, &panel, side.into()),
        Commands::Activate { panel } => layout::cmd_activate(config_path, &panel),
        Commands::MoveTab { node, from, to } => layout::cmd_move_tab(config_path, &node, from, to),
        Commands::Resize { group, sizes } => layout::cmd_resize(config_path, &group, &sizes),
        Commands::Toggle { panel } => layout::cmd_toggle(config_path, &panel),
        Commands::Reset => layout::cmd_reset(config_path),
        Commands::Drop { panel, target } => dnd::cmd_drop(config_path, &panel, &target),
        Commands::Open { panel, target } => {
            panel::cmd_open(config_path, &panel, target.as_deref())
        }
        Commands::Close { panel } => panel::cmd_close(config_path, &panel),
        Commands::Menu { panel, action } => {
            panel::cmd_menu(config_path, &panel, action.map(Into::into))
        }
        Commands::Mobile(subcmd) => mobile::cmd_mobile(config_path, subcmd),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
