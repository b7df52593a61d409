//! Panel layout tree
//!
//! This module provides the data model of the workspace layout and the pure
//! operations that rearrange it:
//!
//! - [`types`]: panel ids, node ids, directions and sides
//! - [`tree`]: the tree itself, traversal helpers and invariant checks
//! - [`ops`]: merge, split, edge moves, tab activation and resizing
//! - [`defaults`]: the compiled-in default layout
//! - [`visibility`]: per-panel visibility flags
//!
//! # Example
//!
//! ```
//! use paneldeck_core::layout::{self, PanelId, Side};
//!
//! let tree = layout::default_layout();
//! let files = layout::find_panel_node(&tree, &PanelId::FILES).unwrap().id.clone();
//! let split = layout::split_panel_at_node(&tree, &PanelId::EDITOR, &files, Side::Right).unwrap();
//! assert!(layout::check_invariants(&split).is_empty());
//! ```

pub mod defaults;
pub mod ops;
pub mod tree;
pub mod types;
pub mod visibility;

pub use defaults::{EDGE_PANEL_SHARE, default_layout, default_visibility};
pub use ops::{
    add_column_at_edge, add_row_at_edge, insert_panel, merge_panel_into_node,
    merge_panel_into_node_at, move_panel_to_edge, move_tab_within_node, open_panel_at_edge,
    remove_panel, set_node_active_tab, split_panel_at_node, update_group_sizes,
};
pub use tree::{
    GroupNode, InvariantViolation, LayoutNode, PanelNode, SIZE_EPSILON, check_invariants,
    clone_tree, equal_sizes, find_panel_node, normalize, normalize_sizes,
};
pub use types::{
    BasePanel, Direction, HorizontalEdge, NodeId, PanelId, PanelIdError, Side, TabId, TerminalId,
    VerticalEdge,
};
pub use visibility::PanelVisibility;
