//! Layout tree structure
//!
//! The layout is an n-ary tree. Each node is either a tab group holding one
//! or more panels (`LayoutNode::Panel`) or a group of children laid out in a
//! row or a column with relative sizes (`LayoutNode::Group`).
//!
//! # Tree Structure
//!
//! ```text
//! Group(row, [0.4, 0.6])
//! ├── Panel([chat])
//! └── Group(column, [0.6, 0.4])
//!     ├── Panel([files, editor, preview], active 0)
//!     └── Panel([terminal])
//! ```
//!
//! Nodes are plain values. Operations in [`super::ops`] read a tree and build
//! a new one; nothing in this module mutates a tree in place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{Direction, NodeId, PanelId};

/// Tolerance used when checking that group sizes sum to one.
pub const SIZE_EPSILON: f64 = 1e-6;

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    /// A tab group of panels.
    Panel(PanelNode),
    /// A row or column of child nodes.
    Group(GroupNode),
}

/// A tab group: one or more panels, one of which is in the foreground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Panels in tab order. Never empty while the node is in a tree.
    pub panel_ids: Vec<PanelId>,
    /// Index of the foreground panel in `panel_ids`.
    #[serde(default)]
    pub active_index: usize,
}

/// A row or column of children with relative sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Layout axis.
    pub direction: Direction,
    /// Child nodes, at least two.
    pub children: Vec<LayoutNode>,
    /// Relative size of each child, parallel to `children`, summing to one.
    pub sizes: Vec<f64>,
}

impl PanelNode {
    /// Creates a tab group with a fresh id and the first panel active.
    #[must_use]
    pub fn new(panel_ids: Vec<PanelId>) -> Self {
        Self {
            id: NodeId::new(),
            panel_ids,
            active_index: 0,
        }
    }

    /// Creates a tab group holding a single panel.
    #[must_use]
    pub fn single(panel_id: PanelId) -> Self {
        Self::new(vec![panel_id])
    }

    /// Creates a tab group with an explicit id and active index.
    #[must_use]
    pub fn with_id(id: impl Into<NodeId>, panel_ids: Vec<PanelId>, active_index: usize) -> Self {
        Self {
            id: id.into(),
            panel_ids,
            active_index,
        }
    }

    /// Returns the foreground panel, clamping a stale active index.
    #[must_use]
    pub fn active_panel(&self) -> Option<&PanelId> {
        let last = self.panel_ids.len().checked_sub(1)?;
        self.panel_ids.get(self.active_index.min(last))
    }

    /// Returns the tab position of a panel in this group.
    #[must_use]
    pub fn index_of(&self, panel_id: &PanelId) -> Option<usize> {
        self.panel_ids.iter().position(|id| id == panel_id)
    }

    /// Returns true if the panel is one of this group's tabs.
    #[must_use]
    pub fn contains(&self, panel_id: &PanelId) -> bool {
        self.panel_ids.contains(panel_id)
    }

    /// Returns true if this group holds exactly the given panel and nothing else.
    #[must_use]
    pub fn holds_only(&self, panel_id: &PanelId) -> bool {
        self.panel_ids.len() == 1 && self.panel_ids[0] == *panel_id
    }
}

impl GroupNode {
    /// Creates a group with a fresh id and the given sizes.
    #[must_use]
    pub fn new(direction: Direction, children: Vec<LayoutNode>, sizes: Vec<f64>) -> Self {
        Self {
            id: NodeId::new(),
            direction,
            children,
            sizes,
        }
    }

    /// Creates a group with a fresh id and equal sizes.
    #[must_use]
    pub fn even(direction: Direction, children: Vec<LayoutNode>) -> Self {
        let sizes = equal_sizes(children.len());
        Self::new(direction, children, sizes)
    }

    /// Creates a group with an explicit id.
    #[must_use]
    pub fn with_id(
        id: impl Into<NodeId>,
        direction: Direction,
        children: Vec<LayoutNode>,
        sizes: Vec<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            direction,
            children,
            sizes,
        }
    }

    /// Returns the sum of the child sizes.
    #[must_use]
    pub fn size_sum(&self) -> f64 {
        self.sizes.iter().sum()
    }
}

impl From<PanelNode> for LayoutNode {
    fn from(node: PanelNode) -> Self {
        Self::Panel(node)
    }
}

impl From<GroupNode> for LayoutNode {
    fn from(node: GroupNode) -> Self {
        Self::Group(node)
    }
}

impl LayoutNode {
    /// Returns the id of this node.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        match self {
            Self::Panel(node) => &node.id,
            Self::Group(node) => &node.id,
        }
    }

    /// Returns the tab group if this is one.
    #[must_use]
    pub const fn as_panel(&self) -> Option<&PanelNode> {
        match self {
            Self::Panel(node) => Some(node),
            Self::Group(_) => None,
        }
    }

    /// Returns the group if this is one.
    #[must_use]
    pub const fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Self::Panel(_) => None,
            Self::Group(node) => Some(node),
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Finds the tab group currently holding a panel (depth-first).
    #[must_use]
    pub fn find_panel_node(&self, panel_id: &PanelId) -> Option<&PanelNode> {
        match self {
            Self::Panel(node) => node.contains(panel_id).then_some(node),
            Self::Group(group) => group
                .children
                .iter()
                .find_map(|child| child.find_panel_node(panel_id)),
        }
    }

    /// Finds any node by id.
    #[must_use]
    pub fn find_node(&self, node_id: &NodeId) -> Option<&Self> {
        if self.id() == node_id {
            return Some(self);
        }
        match self {
            Self::Panel(_) => None,
            Self::Group(group) => group
                .children
                .iter()
                .find_map(|child| child.find_node(node_id)),
        }
    }

    /// Finds a tab group by node id.
    #[must_use]
    pub fn find_tab_group(&self, node_id: &NodeId) -> Option<&PanelNode> {
        self.find_node(node_id).and_then(Self::as_panel)
    }

    /// Finds the group directly containing a node, with the child's index.
    #[must_use]
    pub fn find_parent_group(&self, node_id: &NodeId) -> Option<(&GroupNode, usize)> {
        match self {
            Self::Panel(_) => None,
            Self::Group(group) => group
                .children
                .iter()
                .position(|child| child.id() == node_id)
                .map(|index| (group, index))
                .or_else(|| {
                    group
                        .children
                        .iter()
                        .find_map(|child| child.find_parent_group(node_id))
                }),
        }
    }

    /// Returns every panel in the tree in depth-first, tab order.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        let mut ids = Vec::new();
        self.collect_panel_ids(&mut ids);
        ids
    }

    fn collect_panel_ids(&self, ids: &mut Vec<PanelId>) {
        match self {
            Self::Panel(node) => ids.extend(node.panel_ids.iter().cloned()),
            Self::Group(group) => {
                for child in &group.children {
                    child.collect_panel_ids(ids);
                }
            }
        }
    }

    /// Returns every tab group in the tree in depth-first order.
    #[must_use]
    pub fn tab_groups(&self) -> Vec<&PanelNode> {
        let mut groups = Vec::new();
        self.collect_tab_groups(&mut groups);
        groups
    }

    fn collect_tab_groups<'a>(&'a self, groups: &mut Vec<&'a PanelNode>) {
        match self {
            Self::Panel(node) => groups.push(node),
            Self::Group(group) => {
                for child in &group.children {
                    child.collect_tab_groups(groups);
                }
            }
        }
    }

    /// Returns true if the panel appears anywhere in the tree.
    #[must_use]
    pub fn contains_panel(&self, panel_id: &PanelId) -> bool {
        self.find_panel_node(panel_id).is_some()
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Panel(_) => 1,
            Self::Group(group) => 1 + group.children.iter().map(Self::node_count).sum::<usize>(),
        }
    }

    /// Returns the depth of the tree. A single tab group has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Panel(_) => 0,
            Self::Group(group) => {
                1 + group
                    .children
                    .iter()
                    .map(Self::depth)
                    .max()
                    .unwrap_or_default()
            }
        }
    }
}

/// Finds the tab group currently holding a panel, or `None`.
#[must_use]
pub fn find_panel_node<'a>(tree: &'a LayoutNode, panel_id: &PanelId) -> Option<&'a PanelNode> {
    tree.find_panel_node(panel_id)
}

/// Deep copy of a tree. Node ids are preserved; no storage is shared with
/// the input.
#[must_use]
pub fn clone_tree(tree: &LayoutNode) -> LayoutNode {
    tree.clone()
}

/// Returns `count` equal sizes summing to one.
#[must_use]
pub fn equal_sizes(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![1.0 / count as f64; count]
}

/// Renormalizes sizes so they sum to one.
///
/// Non-finite and negative entries count as zero. When nothing positive is
/// left the sizes are split equally. Sizes already summing to one are kept
/// bit for bit.
#[must_use]
pub fn normalize_sizes(sizes: &[f64]) -> Vec<f64> {
    let cleaned: Vec<f64> = sizes
        .iter()
        .map(|&size| if size.is_finite() && size > 0.0 { size } else { 0.0 })
        .collect();
    let sum: f64 = cleaned.iter().sum();
    if sum <= f64::EPSILON {
        return equal_sizes(cleaned.len());
    }
    if (sum - 1.0).abs() <= SIZE_EPSILON {
        return cleaned;
    }
    cleaned.into_iter().map(|size| size / sum).collect()
}

// ============================================================================
// Invariants
// ============================================================================

/// A violation of the layout tree invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// A tab group with no panels.
    #[error("tab group {0} has no panels")]
    EmptyPanelNode(NodeId),

    /// The tree holds no panel at all.
    #[error("layout has no panels")]
    EmptyLayout,

    /// The active index points past the last tab.
    #[error("tab group {node} has active index {index} but only {len} tabs")]
    ActiveIndexOutOfRange {
        /// Offending tab group.
        node: NodeId,
        /// Stored active index.
        index: usize,
        /// Number of tabs.
        len: usize,
    },

    /// The same panel appears twice in the tree.
    #[error("panel {0} appears more than once")]
    DuplicatePanel(PanelId),

    /// Two nodes share an id.
    #[error("node id {0} is used by more than one node")]
    DuplicateNodeId(NodeId),

    /// `sizes` is not parallel to `children`.
    #[error("group {group} has {children} children but {sizes} sizes")]
    SizeCountMismatch {
        /// Offending group.
        group: NodeId,
        /// Number of children.
        children: usize,
        /// Number of sizes.
        sizes: usize,
    },

    /// A group with fewer than two children.
    #[error("group {group} has only {children} children")]
    DegenerateGroup {
        /// Offending group.
        group: NodeId,
        /// Number of children.
        children: usize,
    },

    /// A negative or non-finite size entry.
    #[error("group {0} has a negative or non-finite size")]
    InvalidSize(NodeId),

    /// Sizes do not sum to one.
    #[error("group {group} sizes sum to {sum}")]
    SizeSumDrift {
        /// Offending group.
        group: NodeId,
        /// Actual sum.
        sum: f64,
    },
}

impl InvariantViolation {
    /// Returns true if the violation cannot be repaired without guessing
    /// which panels or nodes were meant.
    ///
    /// Out-of-range active indices, degenerate groups and size drift are
    /// repaired by [`normalize`]; the rest make a stored tree unusable.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyPanelNode(_)
                | Self::EmptyLayout
                | Self::DuplicatePanel(_)
                | Self::DuplicateNodeId(_)
                | Self::SizeCountMismatch { .. }
        )
    }
}

/// Reports every invariant violation in the tree.
#[must_use]
pub fn check_invariants(tree: &LayoutNode) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut panels = HashSet::new();
    let mut nodes = HashSet::new();
    check_node(tree, &mut panels, &mut nodes, &mut violations);
    if panels.is_empty() {
        violations.push(InvariantViolation::EmptyLayout);
    }
    violations
}

fn check_node<'a>(
    node: &'a LayoutNode,
    panels: &mut HashSet<&'a PanelId>,
    nodes: &mut HashSet<&'a NodeId>,
    violations: &mut Vec<InvariantViolation>,
) {
    if !nodes.insert(node.id()) {
        violations.push(InvariantViolation::DuplicateNodeId(node.id().clone()));
    }
    match node {
        LayoutNode::Panel(panel) => {
            if panel.panel_ids.is_empty() {
                violations.push(InvariantViolation::EmptyPanelNode(panel.id.clone()));
            } else if panel.active_index >= panel.panel_ids.len() {
                violations.push(InvariantViolation::ActiveIndexOutOfRange {
                    node: panel.id.clone(),
                    index: panel.active_index,
                    len: panel.panel_ids.len(),
                });
            }
            for id in &panel.panel_ids {
                if !panels.insert(id) {
                    violations.push(InvariantViolation::DuplicatePanel(id.clone()));
                }
            }
        }
        LayoutNode::Group(group) => {
            if group.children.len() != group.sizes.len() {
                violations.push(InvariantViolation::SizeCountMismatch {
                    group: group.id.clone(),
                    children: group.children.len(),
                    sizes: group.sizes.len(),
                });
            }
            if group.children.len() < 2 {
                violations.push(InvariantViolation::DegenerateGroup {
                    group: group.id.clone(),
                    children: group.children.len(),
                });
            }
            if group.sizes.iter().any(|size| !size.is_finite() || *size < 0.0) {
                violations.push(InvariantViolation::InvalidSize(group.id.clone()));
            } else {
                let sum = group.size_sum();
                if (sum - 1.0).abs() > SIZE_EPSILON {
                    violations.push(InvariantViolation::SizeSumDrift {
                        group: group.id.clone(),
                        sum,
                    });
                }
            }
            for child in &group.children {
                check_node(child, panels, nodes, violations);
            }
        }
    }
}

/// Repairs a tree so that every invariant holds.
///
/// Empty tab groups are pruned, groups left with a single child collapse to
/// that child (cascading upward), active indices are clamped and sizes are
/// renormalized. Returns `None` when no panel is left.
#[must_use]
pub fn normalize(tree: LayoutNode) -> Option<LayoutNode> {
    match tree {
        LayoutNode::Panel(mut panel) => {
            if panel.panel_ids.is_empty() {
                return None;
            }
            panel.active_index = panel.active_index.min(panel.panel_ids.len() - 1);
            Some(LayoutNode::Panel(panel))
        }
        LayoutNode::Group(group) => {
            let GroupNode {
                id,
                direction,
                children,
                sizes,
            } = group;
            let parallel = sizes.len() == children.len();
            let mut kept_children = Vec::with_capacity(children.len());
            let mut kept_sizes = Vec::with_capacity(children.len());
            for (index, child) in children.into_iter().enumerate() {
                if let Some(child) = normalize(child) {
                    kept_children.push(child);
                    kept_sizes.push(if parallel { sizes[index] } else { 1.0 });
                }
            }
            match kept_children.len() {
                0 => None,
                1 => kept_children.pop(),
                _ => Some(LayoutNode::Group(GroupNode {
                    id,
                    direction,
                    children: kept_children,
                    sizes: normalize_sizes(&kept_sizes),
                })),
            }
        }
    }
}
