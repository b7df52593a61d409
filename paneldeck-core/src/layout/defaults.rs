//! Compiled-in default layout

use super::tree::{GroupNode, LayoutNode, PanelNode};
use super::types::{Direction, PanelId};
use super::visibility::PanelVisibility;

/// Share of the screen given to a panel moved to a screen edge.
pub const EDGE_PANEL_SHARE: f64 = 0.3;

/// Node id of the default root row.
pub const ROOT_NODE_ID: &str = "root";
/// Node id of the default chat tab group.
pub const CHAT_GROUP_ID: &str = "chat-group";
/// Node id of the default column on the right.
pub const WORK_COLUMN_ID: &str = "work-column";
/// Node id of the default file manager tab group.
pub const FILES_GROUP_ID: &str = "files-group";
/// Node id of the default terminal tab group.
pub const TERMINAL_GROUP_ID: &str = "terminal-group";

/// Builds the default layout: chat on the left, file manager, editor and
/// preview tabs above the terminal on the right.
///
/// Node ids are fixed so that a fresh layout can be addressed by name.
/// Each call returns a new value.
#[must_use]
pub fn default_layout() -> LayoutNode {
    LayoutNode::Group(GroupNode::with_id(
        ROOT_NODE_ID,
        Direction::Row,
        vec![
            LayoutNode::Panel(PanelNode::with_id(CHAT_GROUP_ID, vec![PanelId::CHAT], 0)),
            LayoutNode::Group(GroupNode::with_id(
                WORK_COLUMN_ID,
                Direction::Column,
                vec![
                    LayoutNode::Panel(PanelNode::with_id(
                        FILES_GROUP_ID,
                        vec![PanelId::FILES, PanelId::EDITOR, PanelId::PREVIEW],
                        0,
                    )),
                    LayoutNode::Panel(PanelNode::with_id(
                        TERMINAL_GROUP_ID,
                        vec![PanelId::TERMINAL],
                        0,
                    )),
                ],
                vec![0.6, 0.4],
            )),
        ],
        vec![0.4, 0.6],
    ))
}

/// Default visibility: chat, file manager and terminal shown.
#[must_use]
pub fn default_visibility() -> PanelVisibility {
    PanelVisibility::default()
}
