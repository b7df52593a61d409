//! Tree operations
//!
//! Every operation reads a tree and returns a new one. `None` means the
//! operation does not apply (unknown panel or node, drop on self, a
//! rearrangement that would leave nothing behind) and the caller keeps its
//! current tree.
//!
//! Results always satisfy the tree invariants: emptied tab groups are pruned,
//! groups left with one child collapse into it, and sizes are renormalized
//! on every write.

use super::defaults::EDGE_PANEL_SHARE;
use super::tree::{GroupNode, LayoutNode, PanelNode, equal_sizes, normalize, normalize_sizes};
use super::types::{Direction, HorizontalEdge, NodeId, PanelId, Side, VerticalEdge};

impl From<HorizontalEdge> for Side {
    fn from(edge: HorizontalEdge) -> Self {
        match edge {
            HorizontalEdge::Left => Self::Left,
            HorizontalEdge::Right => Self::Right,
        }
    }
}

impl From<VerticalEdge> for Side {
    fn from(edge: VerticalEdge) -> Self {
        match edge {
            VerticalEdge::Top => Self::Top,
            VerticalEdge::Bottom => Self::Bottom,
        }
    }
}

// ============================================================================
// Moving Panels Between Tab Groups
// ============================================================================

/// Moves a panel into another tab group as its last, active tab.
///
/// Returns `None` if the panel or the target tab group is missing, or if the
/// panel already lives in the target.
#[must_use]
pub fn merge_panel_into_node(
    tree: &LayoutNode,
    panel_id: &PanelId,
    target_node_id: &NodeId,
) -> Option<LayoutNode> {
    merge_panel_into_node_at(tree, panel_id, target_node_id, usize::MAX)
}

/// Moves a panel into another tab group at a tab position and activates it.
///
/// Positions past the end append.
#[must_use]
pub fn merge_panel_into_node_at(
    tree: &LayoutNode,
    panel_id: &PanelId,
    target_node_id: &NodeId,
    index: usize,
) -> Option<LayoutNode> {
    let source = tree.find_panel_node(panel_id)?;
    tree.find_tab_group(target_node_id)?;
    if source.id == *target_node_id {
        return None;
    }

    let mut next = without_panel(tree, panel_id)?;
    let target = tab_group_mut(&mut next, target_node_id)?;
    let index = index.min(target.panel_ids.len());
    target.panel_ids.insert(index, panel_id.clone());
    target.active_index = index;
    normalize(next)
}

/// Pulls a panel out into its own tab group beside a target tab group.
///
/// When the target's parent already runs along the split axis the new tab
/// group becomes a sibling and every sibling gets an equal share. Otherwise
/// the target is wrapped in a new two-child group at `[0.5, 0.5]`.
///
/// Splitting a multi-tab group with one of its own panels is allowed; a tab
/// group holding only the panel is not a valid target.
#[must_use]
pub fn split_panel_at_node(
    tree: &LayoutNode,
    panel_id: &PanelId,
    target_node_id: &NodeId,
    side: Side,
) -> Option<LayoutNode> {
    tree.find_panel_node(panel_id)?;
    if tree.find_tab_group(target_node_id)?.holds_only(panel_id) {
        return None;
    }

    let next = without_panel(tree, panel_id)?;
    insert_beside(next, PanelNode::single(panel_id.clone()), target_node_id, side)
}

/// Makes a panel the foreground tab of a tab group.
///
/// Returns `None` if the node is not a tab group or does not hold the panel.
/// Activating the tab that is already active returns an equal tree.
#[must_use]
pub fn set_node_active_tab(
    tree: &LayoutNode,
    node_id: &NodeId,
    panel_id: &PanelId,
) -> Option<LayoutNode> {
    let index = tree.find_tab_group(node_id)?.index_of(panel_id)?;
    let mut next = tree.clone();
    tab_group_mut(&mut next, node_id)?.active_index = index;
    normalize(next)
}

/// Reorders a tab inside its tab group. The active panel keeps focus.
#[must_use]
pub fn move_tab_within_node(
    tree: &LayoutNode,
    node_id: &NodeId,
    from: usize,
    to: usize,
) -> Option<LayoutNode> {
    let node = tree.find_tab_group(node_id)?;
    let len = node.panel_ids.len();
    let to = to.min(len.saturating_sub(1));
    if from >= len || from == to {
        return None;
    }

    let mut next = tree.clone();
    let node = tab_group_mut(&mut next, node_id)?;
    let active = node.active_panel().cloned();
    let moved = node.panel_ids.remove(from);
    node.panel_ids.insert(to, moved);
    if let Some(active) = active {
        node.active_index = node.index_of(&active).unwrap_or_default();
    }
    normalize(next)
}

// ============================================================================
// Screen Edges
// ============================================================================

/// Moves a panel into a new column at the left or right screen edge.
///
/// The old root is wrapped in a new top-level row. The new column takes
/// [`EDGE_PANEL_SHARE`] of the width. Returns `None` when the panel is the
/// only panel in the tree.
#[must_use]
pub fn add_column_at_edge(
    tree: &LayoutNode,
    panel_id: &PanelId,
    edge: HorizontalEdge,
) -> Option<LayoutNode> {
    move_panel_to_edge(tree, panel_id, edge.into(), EDGE_PANEL_SHARE)
}

/// Moves a panel into a new row at the top or bottom screen edge.
///
/// Same rules as [`add_column_at_edge`] along the column axis.
#[must_use]
pub fn add_row_at_edge(
    tree: &LayoutNode,
    panel_id: &PanelId,
    edge: VerticalEdge,
) -> Option<LayoutNode> {
    move_panel_to_edge(tree, panel_id, edge.into(), EDGE_PANEL_SHARE)
}

/// Moves a panel to any screen edge with an explicit share for the new
/// column or row.
///
/// A share outside `(0, 1)` falls back to [`EDGE_PANEL_SHARE`].
#[must_use]
pub fn move_panel_to_edge(
    tree: &LayoutNode,
    panel_id: &PanelId,
    side: Side,
    share: f64,
) -> Option<LayoutNode> {
    tree.find_panel_node(panel_id)?;
    let rest = without_panel(tree, panel_id)?;
    normalize(wrap_root(rest, PanelNode::single(panel_id.clone()), side, share))
}

/// Opens a panel that is not yet in the tree at a screen edge.
#[must_use]
pub fn open_panel_at_edge(
    tree: &LayoutNode,
    panel_id: &PanelId,
    side: Side,
    share: f64,
) -> Option<LayoutNode> {
    if tree.contains_panel(panel_id) {
        return None;
    }
    normalize(wrap_root(
        tree.clone(),
        PanelNode::single(panel_id.clone()),
        side,
        share,
    ))
}

fn wrap_root(root: LayoutNode, panel: PanelNode, side: Side, share: f64) -> LayoutNode {
    let share = if share.is_finite() && share > 0.0 && share < 1.0 {
        share
    } else {
        EDGE_PANEL_SHARE
    };
    let panel = LayoutNode::Panel(panel);
    let (children, sizes) = if side.is_leading() {
        (vec![panel, root], vec![share, 1.0 - share])
    } else {
        (vec![root, panel], vec![1.0 - share, share])
    };
    LayoutNode::Group(GroupNode::new(side.axis(), children, sizes))
}

// ============================================================================
// Opening and Closing Panels
// ============================================================================

/// Opens a panel that is not yet in the tree as the active tab of a tab group.
#[must_use]
pub fn insert_panel(
    tree: &LayoutNode,
    panel_id: &PanelId,
    target_node_id: &NodeId,
) -> Option<LayoutNode> {
    if tree.contains_panel(panel_id) {
        return None;
    }
    let mut next = tree.clone();
    let target = tab_group_mut(&mut next, target_node_id)?;
    target.panel_ids.push(panel_id.clone());
    target.active_index = target.panel_ids.len() - 1;
    normalize(next)
}

/// Removes a panel from the tree.
///
/// Returns `None` if the panel is missing or is the last panel of the tree.
#[must_use]
pub fn remove_panel(tree: &LayoutNode, panel_id: &PanelId) -> Option<LayoutNode> {
    tree.find_panel_node(panel_id)?;
    without_panel(tree, panel_id)
}

// ============================================================================
// Resizing
// ============================================================================

/// Replaces the sizes of a group after a resize.
///
/// The sizes are renormalized before they are stored. Returns `None` if the
/// node is not a group or the number of sizes does not match its children.
#[must_use]
pub fn update_group_sizes(
    tree: &LayoutNode,
    group_id: &NodeId,
    sizes: &[f64],
) -> Option<LayoutNode> {
    let mut next = tree.clone();
    let group = group_mut(&mut next, group_id)?;
    if group.children.len() != sizes.len() {
        return None;
    }
    group.sizes = normalize_sizes(sizes);
    normalize(next)
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Copy of the tree with the panel removed and the prune and collapse
/// cascade applied. `None` when nothing is left.
fn without_panel(tree: &LayoutNode, panel_id: &PanelId) -> Option<LayoutNode> {
    let mut next = tree.clone();
    remove_from_tab_group(&mut next, panel_id);
    normalize(next)
}

fn remove_from_tab_group(node: &mut LayoutNode, panel_id: &PanelId) -> bool {
    match node {
        LayoutNode::Panel(panel) => {
            let Some(index) = panel.index_of(panel_id) else {
                return false;
            };
            panel.panel_ids.remove(index);
            if index < panel.active_index {
                panel.active_index -= 1;
            }
            panel.active_index = panel
                .active_index
                .min(panel.panel_ids.len().saturating_sub(1));
            true
        }
        LayoutNode::Group(group) => group
            .children
            .iter_mut()
            .any(|child| remove_from_tab_group(child, panel_id)),
    }
}

fn insert_beside(
    tree: LayoutNode,
    panel: PanelNode,
    target_node_id: &NodeId,
    side: Side,
) -> Option<LayoutNode> {
    tree.find_tab_group(target_node_id)?;
    let axis = side.axis();

    let sibling_slot = tree
        .find_parent_group(target_node_id)
        .filter(|(parent, _)| parent.direction == axis)
        .map(|(parent, index)| (parent.id.clone(), index));

    let next = match sibling_slot {
        Some((parent_id, index)) => {
            let mut next = tree;
            let parent = group_mut(&mut next, &parent_id)?;
            let at = if side.is_leading() { index } else { index + 1 };
            parent.children.insert(at, LayoutNode::Panel(panel));
            parent.sizes = equal_sizes(parent.children.len());
            next
        }
        None => wrap_target(tree, target_node_id, axis, side.is_leading(), &panel),
    };
    normalize(next)
}

fn wrap_target(
    node: LayoutNode,
    target_node_id: &NodeId,
    axis: Direction,
    leading: bool,
    panel: &PanelNode,
) -> LayoutNode {
    if node.id() == target_node_id {
        let new_node = LayoutNode::Panel(panel.clone());
        let children = if leading {
            vec![new_node, node]
        } else {
            vec![node, new_node]
        };
        return LayoutNode::Group(GroupNode::new(axis, children, vec![0.5, 0.5]));
    }
    match node {
        LayoutNode::Group(mut group) => {
            group.children = group
                .children
                .into_iter()
                .map(|child| wrap_target(child, target_node_id, axis, leading, panel))
                .collect();
            LayoutNode::Group(group)
        }
        panel_node @ LayoutNode::Panel(_) => panel_node,
    }
}

fn tab_group_mut<'a>(node: &'a mut LayoutNode, node_id: &NodeId) -> Option<&'a mut PanelNode> {
    match node {
        LayoutNode::Panel(panel) => (panel.id == *node_id).then_some(panel),
        LayoutNode::Group(group) => group
            .children
            .iter_mut()
            .find_map(|child| tab_group_mut(child, node_id)),
    }
}

fn group_mut<'a>(node: &'a mut LayoutNode, group_id: &NodeId) -> Option<&'a mut GroupNode> {
    match node {
        LayoutNode::Panel(_) => None,
        LayoutNode::Group(group) => {
            if group.id == *group_id {
                return Some(group);
            }
            group
                .children
                .iter_mut()
                .find_map(|child| group_mut(child, group_id))
        }
    }
}
