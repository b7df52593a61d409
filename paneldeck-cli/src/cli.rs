//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use paneldeck_core::layout::{PanelId, Side};
use paneldeck_core::panels::PanelMenuAction;
use paneldeck_core::settings::CONFIG_DIR_ENV;
use paneldeck_core::store::MobilePosition;

/// `Paneldeck` command-line interface for inspecting and rearranging the
/// workspace layout
#[derive(Parser)]
#[command(name = "paneldeck-cli")]
#[command(author, version, about = "Paneldeck layout command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = CONFIG_DIR_ENV)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the stored layout
    #[command(about = "Show the stored layout tree")]
    Show {
        /// Output format
        #[arg(short, long, default_value = "tree", value_enum)]
        format: OutputFormat,
    },

    /// Show what is drawn and where
    #[command(about = "Show the visible layout with tab group geometry")]
    Render {
        /// Width of the layout area in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Height of the layout area in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// Output format
        #[arg(short, long, default_value = "tree", value_enum)]
        format: OutputFormat,
    },

    /// List the drop zones shown while a panel is dragged
    #[command(about = "List drop zones for a dragged panel")]
    Zones {
        /// Panel being dragged
        #[arg(long, value_name = "PANEL")]
        dragging: PanelId,

        /// Width of the layout area in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Height of the layout area in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// Only report the zone under this point (x,y)
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        at: Option<(f64, f64)>,
    },

    /// Give a panel its own tab group beside a node
    #[command(about = "Split a panel out beside a tab group")]
    Split {
        /// Panel to move
        panel: PanelId,

        /// Target tab group id
        target: String,

        /// Side of the target
        #[arg(short, long, value_enum)]
        side: SideArg,
    },

    /// Move a panel into a tab group
    #[command(about = "Merge a panel into a tab group")]
    Merge {
        /// Panel to move
        panel: PanelId,

        /// Target tab group id
        target: String,

        /// Tab position (defaults to the end)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Move a panel to a screen edge
    #[command(about = "Move a panel into a new column or row at a screen edge")]
    Edge {
        /// Panel to move
        panel: PanelId,

        /// Screen edge
        #[arg(value_enum)]
        side: SideArg,
    },

    /// Bring a tab to the front
    #[command(about = "Make a panel the active tab of its tab group")]
    Activate {
        /// Panel to activate
        panel: PanelId,
    },

    /// Reorder a tab within its tab group
    #[command(about = "Move a tab to another position in its tab group")]
    MoveTab {
        /// Tab group id
        node: String,

        /// Current position
        from: usize,

        /// New position
        to: usize,
    },

    /// Set the sizes of a group
    #[command(about = "Resize the children of a group")]
    Resize {
        /// Group id
        group: String,

        /// Comma-separated sizes, renormalized to sum to one
        #[arg(value_delimiter = ',', required = true, num_args = 1..)]
        sizes: Vec<f64>,
    },

    /// Show or hide a built-in panel
    #[command(about = "Toggle the visibility of a built-in panel")]
    Toggle {
        /// Built-in panel (chat, files, editor, preview, terminal)
        panel: PanelId,
    },

    /// Restore the default layout
    #[command(about = "Restore the default layout and visibility")]
    Reset,

    /// Drop a panel on a target id
    #[command(about = "Simulate dropping a panel on a drop target")]
    Drop {
        /// Dragged panel
        panel: PanelId,

        /// Drop target id (edge-left, split-right-<node>, merge-<node>,
        /// tab-<index>-<node>)
        target: String,
    },

    /// Open a detached editor or terminal
    #[command(about = "Open a detached editor or terminal panel")]
    Open {
        /// Detached panel id (detached-editor:<tab>, detached-terminal:<id>)
        panel: PanelId,

        /// Tab group to open it in
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Close a panel
    #[command(about = "Hide a built-in panel or remove a detached one")]
    Close {
        /// Panel to close
        panel: PanelId,
    },

    /// Panel context menu
    #[command(about = "List or run panel context-menu actions")]
    Menu {
        /// Panel the menu belongs to
        panel: PanelId,

        /// Action to run; lists the available actions when omitted
        #[arg(value_enum)]
        action: Option<MenuActionArg>,
    },

    /// Mobile slot management
    #[command(subcommand)]
    Mobile(MobileCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Mobile slot subcommands
#[derive(Subcommand)]
pub enum MobileCommands {
    /// Show the mobile slots
    Show,

    /// Open a panel in a mobile slot
    Open {
        /// Panel to open
        panel: PanelId,

        /// Slot to open it in
        #[arg(short, long, default_value = "bottom", value_enum)]
        position: PositionArg,
    },

    /// Close a mobile slot
    Close {
        /// Panel to close
        panel: PanelId,
    },

    /// Show a panel in a slot
    Select {
        /// Slot index
        slot: usize,

        /// Panel to show
        panel: PanelId,
    },

    /// Add a second slot
    Split,

    /// Swap the two slots
    Swap,

    /// Simulate dropping a slot's drag handle on a target id
    Drop {
        /// Dragged slot index
        slot: usize,

        /// Drop target id (mobile-slot-<index>)
        target: String,
    },
}

/// Output format for layout listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree
    Tree,
    /// JSON
    Json,
}

/// Side or screen edge argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    /// Top
    Top,
    /// Bottom
    Bottom,
    /// Left
    Left,
    /// Right
    Right,
}

impl From<SideArg> for Side {
    fn from(value: SideArg) -> Self {
        match value {
            SideArg::Top => Self::Top,
            SideArg::Bottom => Self::Bottom,
            SideArg::Left => Self::Left,
            SideArg::Right => Self::Right,
        }
    }
}

/// Mobile slot position argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PositionArg {
    /// Upper slot
    Top,
    /// Lower slot
    Bottom,
}

impl From<PositionArg> for MobilePosition {
    fn from(value: PositionArg) -> Self {
        match value {
            PositionArg::Top => Self::Top,
            PositionArg::Bottom => Self::Bottom,
        }
    }
}

/// Context-menu action argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MenuActionArg {
    /// Open in a separate panel
    SplitOut,
    /// Hide a built-in panel
    Hide,
    /// Return a detached panel
    Reattach,
    /// Close a detached panel
    CloseDetached,
    /// Restore the default layout
    ResetLayout,
}

impl From<MenuActionArg> for PanelMenuAction {
    fn from(value: MenuActionArg) -> Self {
        match value {
            MenuActionArg::SplitOut => Self::SplitOut,
            MenuActionArg::Hide => Self::Hide,
            MenuActionArg::Reattach => Self::Reattach,
            MenuActionArg::CloseDetached => Self::CloseDetached,
            MenuActionArg::ResetLayout => Self::ResetLayout,
        }
    }
}

/// Parses an `x,y` point
fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("invalid point: no `,` found in `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("invalid x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("invalid y in `{s}`: {e}"))?;
    Ok((x, y))
}
