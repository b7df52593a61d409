//! Drag-and-drop protocol
//!
//! Gestures are turned into layout actions in three steps:
//!
//! 1. [`sensor::DragController`] decides when a press becomes a drag.
//! 2. [`zones`] maps the pointer position to a [`DropTarget`].
//! 3. [`handle_drag_end`] classifies the target into a [`DropAction`] and
//!    dispatches it to the [`LayoutStore`].
//!
//! Drop targets use a fixed naming convention so that any UI toolkit can
//! tag its drop regions with plain strings:
//!
//! | Id                         | Meaning                                  |
//! |----------------------------|------------------------------------------|
//! | `edge-{side}`              | new column or row at a screen edge       |
//! | `split-{side}-{nodeId}`    | own tab group beside a node              |
//! | `merge-{nodeId}`           | join a tab group                         |
//! | `tab-{index}-{nodeId}`     | join a tab group at a tab position       |
//! | `mobile-slot-{index}`      | mobile slot (swap)                       |
//!
//! Mobile drag handles are named `mobile-drag-{index}`.

pub mod sensor;
pub mod zones;

pub use sensor::{
    ActivationConstraint, DragController, DragPhase, InputKind, SensorEvent, SensorSettings,
};
pub use zones::{DropZone, ZoneKind, build_drop_zones, calculate_zone_kind, hit_test};

use std::fmt;
use std::str::FromStr;

use crate::layout::{LayoutNode, NodeId, PanelId, Side};
use crate::store::{LayoutStorage, LayoutStore};
use crate::tracing::{field_names, span_names};

/// A drop region, decoded from its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Screen edge.
    Edge(Side),
    /// Directional band of a tab group.
    Split {
        /// Side of the target the panel goes to.
        side: Side,
        /// Target tab group.
        node: NodeId,
    },
    /// Center of a tab group.
    Merge {
        /// Target tab group.
        node: NodeId,
    },
    /// Tab position in a tab strip.
    Tab {
        /// Position the panel is dropped at.
        index: usize,
        /// Tab group owning the strip.
        node: NodeId,
    },
    /// Mobile slot.
    MobileSlot(usize),
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge(side) => write!(f, "edge-{side}"),
            Self::Split { side, node } => write!(f, "split-{side}-{node}"),
            Self::Merge { node } => write!(f, "merge-{node}"),
            Self::Tab { index, node } => write!(f, "tab-{index}-{node}"),
            Self::MobileSlot(index) => write!(f, "mobile-slot-{index}"),
        }
    }
}

/// Error for ids outside the naming convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized drop target: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for DropTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_target(s).ok_or_else(|| UnknownTarget(s.to_owned()))
    }
}

fn parse_target(s: &str) -> Option<DropTarget> {
    if let Some(side) = s.strip_prefix("edge-") {
        return side.parse().ok().map(DropTarget::Edge);
    }
    if let Some(rest) = s.strip_prefix("split-") {
        let (side, node) = rest.split_once('-')?;
        return Some(DropTarget::Split {
            side: side.parse().ok()?,
            node: non_empty_node(node)?,
        });
    }
    if let Some(node) = s.strip_prefix("merge-") {
        return Some(DropTarget::Merge {
            node: non_empty_node(node)?,
        });
    }
    if let Some(rest) = s.strip_prefix("tab-") {
        let (index, node) = rest.split_once('-')?;
        return Some(DropTarget::Tab {
            index: index.parse().ok()?,
            node: non_empty_node(node)?,
        });
    }
    if let Some(index) = s.strip_prefix("mobile-slot-") {
        return index.parse().ok().map(DropTarget::MobileSlot);
    }
    None
}

fn non_empty_node(id: &str) -> Option<NodeId> {
    (!id.is_empty()).then(|| NodeId::from(id))
}

/// Formats the id of a mobile drag handle.
#[must_use]
pub fn mobile_drag_handle(slot: usize) -> String {
    format!("mobile-drag-{slot}")
}

/// Parses the id of a mobile drag handle.
#[must_use]
pub fn parse_mobile_drag_handle(id: &str) -> Option<usize> {
    id.strip_prefix("mobile-drag-")?.parse().ok()
}

/// A layout change requested by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Move the panel to a screen edge.
    MoveToEdge {
        /// Dragged panel.
        panel: PanelId,
        /// Screen edge.
        side: Side,
    },
    /// Give the panel its own tab group beside a node.
    Split {
        /// Dragged panel.
        panel: PanelId,
        /// Target tab group.
        node: NodeId,
        /// Side of the target.
        side: Side,
    },
    /// Append the panel to a tab group.
    Merge {
        /// Dragged panel.
        panel: PanelId,
        /// Target tab group.
        node: NodeId,
    },
    /// Insert the panel into another tab group at a position.
    MergeAt {
        /// Dragged panel.
        panel: PanelId,
        /// Target tab group.
        node: NodeId,
        /// Tab position.
        index: usize,
    },
    /// Move a tab within its own tab group.
    Reorder {
        /// Tab group.
        node: NodeId,
        /// Current position.
        from: usize,
        /// New position.
        to: usize,
    },
}

/// Classifies a drop of `panel` on `target`.
///
/// Returns `None` for targets that cannot apply: the panel is not in the
/// tree, the target is a mobile slot, the merge target is the panel's own
/// tab group, or a tab drop would leave the panel where it is.
#[must_use]
pub fn classify_drop(layout: &LayoutNode, panel: &PanelId, target: &DropTarget) -> Option<DropAction> {
    let source = layout.find_panel_node(panel)?;
    match target {
        DropTarget::Edge(side) => Some(DropAction::MoveToEdge {
            panel: panel.clone(),
            side: *side,
        }),
        DropTarget::Split { side, node } => Some(DropAction::Split {
            panel: panel.clone(),
            node: node.clone(),
            side: *side,
        }),
        DropTarget::Merge { node } => (source.id != *node).then(|| DropAction::Merge {
            panel: panel.clone(),
            node: node.clone(),
        }),
        DropTarget::Tab { index, node } if source.id == *node => {
            let from = source.index_of(panel)?;
            let to = (*index).min(source.panel_ids.len() - 1);
            (from != to).then(|| DropAction::Reorder {
                node: node.clone(),
                from,
                to,
            })
        }
        DropTarget::Tab { index, node } => Some(DropAction::MergeAt {
            panel: panel.clone(),
            node: node.clone(),
            index: *index,
        }),
        DropTarget::MobileSlot(_) => None,
    }
}

/// Dispatches a drop action. Returns true if the layout changed.
pub fn apply_drop<S: LayoutStorage>(store: &mut LayoutStore<S>, action: &DropAction) -> bool {
    match action {
        DropAction::MoveToEdge { panel, side } => store.move_panel_to_edge(panel, *side),
        DropAction::Split { panel, node, side } => store.split_panel(panel, node, *side),
        DropAction::Merge { panel, node } => store.merge_panels(panel, node),
        DropAction::MergeAt { panel, node, index } => store.merge_panels_at(panel, node, *index),
        DropAction::Reorder { node, from, to } => store.move_tab(node, *from, *to),
    }
}

/// Marks the start of a drag.
pub fn handle_drag_start<S: LayoutStorage>(store: &mut LayoutStore<S>, panel: &PanelId) {
    store.set_dragging(Some(panel.clone()));
}

/// Ends a drag over `over` (the id of the drop region under the pointer).
///
/// Drag state is cleared whatever happens. An absent or unrecognized target
/// is a no-op. Returns true if the layout changed.
pub fn handle_drag_end<S: LayoutStorage>(
    store: &mut LayoutStore<S>,
    panel: &PanelId,
    over: Option<&str>,
) -> bool {
    let _span = crate::trace_operation!(
        span_names::DND_DROP,
        panel = %panel,
        target = over.unwrap_or("")
    )
    .entered();
    store.set_dragging(None);

    let Some(over) = over else {
        tracing::trace!("drag ended over no target");
        return false;
    };
    let target = match over.parse::<DropTarget>() {
        Ok(target) => target,
        Err(err) => {
            tracing::debug!({ field_names::ERROR } = %err, "ignoring drop");
            return false;
        }
    };
    let Some(action) = classify_drop(store.layout(), panel, &target) else {
        tracing::trace!({ field_names::TARGET } = %target, "drop does not apply");
        return false;
    };
    tracing::debug!(?action, "dispatching drop");
    apply_drop(store, &action)
}

/// Ends a mobile drag of `source_slot` over `over`. Dropping one slot on the
/// other swaps them.
pub fn handle_mobile_drag_end<S: LayoutStorage>(
    store: &mut LayoutStore<S>,
    source_slot: usize,
    over: Option<&str>,
) -> bool {
    let _span = crate::trace_operation!(
        span_names::DND_MOBILE_DROP,
        source = source_slot,
        target = over.unwrap_or("")
    )
    .entered();
    match over.and_then(|id| id.parse::<DropTarget>().ok()) {
        Some(DropTarget::MobileSlot(target)) => store.swap_mobile_slots(source_slot, target),
        _ => false,
    }
}
