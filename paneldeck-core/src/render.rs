//! Visible render tree and geometry
//!
//! [`render_tree`] derives what is actually drawn from the stored tree and
//! the visibility flags. Hidden panels keep their place in the stored tree;
//! they are only filtered out here.

use serde::Serialize;

use crate::geometry::Rect;
use crate::layout::{Direction, LayoutNode, NodeId, PanelId, PanelVisibility, normalize_sizes};
use crate::panels::{PanelContentProvider, PanelIcon};
use crate::tracing::span_names;

/// One tab of a rendered tab group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    /// The panel behind the tab.
    pub panel: PanelId,
    /// Display title.
    pub title: String,
    /// Icon next to the title.
    pub icon: PanelIcon,
    /// True for the foreground tab.
    pub is_active: bool,
}

/// A node of the visible tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    /// Two or more visible children side by side or stacked.
    Split {
        /// Id of the stored group.
        group: NodeId,
        /// Layout axis.
        direction: Direction,
        /// Visible children.
        children: Vec<RenderNode>,
        /// Sizes renormalized over the visible children.
        sizes: Vec<f64>,
    },
    /// A tab group with at least one visible tab.
    Tabs {
        /// Id of the stored tab group.
        node: NodeId,
        /// Visible tabs in order.
        tabs: Vec<TabView>,
        /// Index of the foreground tab in `tabs`.
        active: usize,
    },
}

impl RenderNode {
    /// Returns the id of the stored node this was rendered from.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        match self {
            Self::Split { group, .. } => group,
            Self::Tabs { node, .. } => node,
        }
    }

    /// Returns the foreground panel of a tab group.
    #[must_use]
    pub fn active_panel(&self) -> Option<&PanelId> {
        match self {
            Self::Split { .. } => None,
            Self::Tabs { tabs, active, .. } => tabs.get(*active).map(|tab| &tab.panel),
        }
    }

    /// Number of visible tab groups.
    #[must_use]
    pub fn tab_group_count(&self) -> usize {
        match self {
            Self::Split { children, .. } => children.iter().map(Self::tab_group_count).sum(),
            Self::Tabs { .. } => 1,
        }
    }
}

/// Derives the visible tree.
///
/// Hidden panels are dropped, a tab group without visible tabs disappears,
/// group sizes are renormalized over the children that remain, and a group
/// left with one visible child renders as that child. The foreground tab is
/// the stored active panel if visible, otherwise the first visible tab.
/// Returns `None` when nothing is visible.
#[must_use]
pub fn render_tree(
    layout: &LayoutNode,
    visibility: &PanelVisibility,
    provider: &impl PanelContentProvider,
) -> Option<RenderNode> {
    let _span = crate::trace_operation_debug!(span_names::RENDER_TREE).entered();
    render_node(layout, visibility, provider)
}

fn render_node(
    node: &LayoutNode,
    visibility: &PanelVisibility,
    provider: &impl PanelContentProvider,
) -> Option<RenderNode> {
    match node {
        LayoutNode::Panel(panel) => {
            let visible: Vec<&PanelId> = panel
                .panel_ids
                .iter()
                .filter(|id| visibility.is_visible(id))
                .collect();
            let first = *visible.first()?;
            let active_panel = panel
                .active_panel()
                .filter(|id| visibility.is_visible(id))
                .unwrap_or(first);

            let mut active = 0;
            let tabs = visible
                .into_iter()
                .enumerate()
                .map(|(index, id)| {
                    let is_active = id == active_panel;
                    if is_active {
                        active = index;
                    }
                    let descriptor = provider.descriptor(id);
                    TabView {
                        panel: id.clone(),
                        title: descriptor.title,
                        icon: descriptor.icon,
                        is_active,
                    }
                })
                .collect();
            Some(RenderNode::Tabs {
                node: panel.id.clone(),
                tabs,
                active,
            })
        }
        LayoutNode::Group(group) => {
            let mut children = Vec::with_capacity(group.children.len());
            let mut sizes = Vec::with_capacity(group.children.len());
            for (index, child) in group.children.iter().enumerate() {
                if let Some(rendered) = render_node(child, visibility, provider) {
                    children.push(rendered);
                    sizes.push(group.sizes.get(index).copied().unwrap_or(0.0));
                }
            }
            match children.len() {
                0 => None,
                1 => children.pop(),
                _ => Some(RenderNode::Split {
                    group: group.id.clone(),
                    direction: group.direction,
                    children,
                    sizes: normalize_sizes(&sizes),
                }),
            }
        }
    }
}

/// Lays out every visible tab group inside `bounds`.
///
/// Children of a split get consecutive slices of their parent along its
/// axis; the last child takes whatever remains so that slices tile the
/// parent exactly.
#[must_use]
pub fn layout_rects(node: &RenderNode, bounds: Rect) -> Vec<(NodeId, Rect)> {
    let mut rects = Vec::new();
    collect_rects(node, bounds, &mut rects);
    rects
}

fn collect_rects(node: &RenderNode, bounds: Rect, rects: &mut Vec<(NodeId, Rect)>) {
    match node {
        RenderNode::Tabs { node, .. } => rects.push((node.clone(), bounds)),
        RenderNode::Split {
            direction,
            children,
            sizes,
            ..
        } => {
            let extent = match direction {
                Direction::Row => bounds.width,
                Direction::Column => bounds.height,
            };
            let mut offset = 0.0;
            let last = children.len().saturating_sub(1);
            for (index, child) in children.iter().enumerate() {
                let span = if index == last {
                    extent - offset
                } else {
                    extent * sizes.get(index).copied().unwrap_or(0.0)
                };
                let slice = match direction {
                    Direction::Row => Rect::new(bounds.x + offset, bounds.y, span, bounds.height),
                    Direction::Column => Rect::new(bounds.x, bounds.y + offset, bounds.width, span),
                };
                collect_rects(child, slice, rects);
                offset += span;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::defaults::{CHAT_GROUP_ID, FILES_GROUP_ID, TERMINAL_GROUP_ID};
    use crate::layout::{GroupNode, PanelNode, default_layout};
    use crate::panels::{EmptyRegistry, PanelCatalog};

    fn catalog() -> PanelCatalog<EmptyRegistry> {
        PanelCatalog::new(EmptyRegistry)
    }

    #[test]
    fn default_layout_hides_editor_and_preview_tabs() {
        let rendered =
            render_tree(&default_layout(), &PanelVisibility::default(), &catalog()).unwrap();
        assert_eq!(rendered.tab_group_count(), 3);

        let rects = layout_rects(&rendered, Rect::new(0.0, 0.0, 1000.0, 500.0));
        let files = rects
            .iter()
            .find(|(id, _)| id.as_str() == FILES_GROUP_ID)
            .unwrap();
        assert!((files.1.x - 400.0).abs() < 1e-9);
        assert!((files.1.height - 300.0).abs() < 1e-9);
    }

    #[test]
    fn hidden_tab_group_collapses_parent() {
        let visibility = PanelVisibility {
            terminal: false,
            ..PanelVisibility::default()
        };
        let rendered = render_tree(&default_layout(), &visibility, &catalog()).unwrap();
        let RenderNode::Split { children, .. } = &rendered else {
            panic!("expected split");
        };
        assert_eq!(children[1].id().as_str(), FILES_GROUP_ID);
        let ids: Vec<_> = layout_rects(&rendered, Rect::new(0.0, 0.0, 100.0, 100.0))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert!(!ids.iter().any(|id| id.as_str() == TERMINAL_GROUP_ID));
    }

    #[test]
    fn sizes_renormalize_over_visible_children() {
        let layout = LayoutNode::Group(GroupNode::with_id(
            "g",
            Direction::Row,
            vec![
                LayoutNode::Panel(PanelNode::with_id("a", vec![PanelId::CHAT], 0)),
                LayoutNode::Panel(PanelNode::with_id("b", vec![PanelId::EDITOR], 0)),
                LayoutNode::Panel(PanelNode::with_id("c", vec![PanelId::FILES], 0)),
            ],
            vec![0.2, 0.3, 0.5],
        ));
        let rendered = render_tree(&layout, &PanelVisibility::default(), &catalog()).unwrap();
        let RenderNode::Split { sizes, .. } = rendered else {
            panic!("expected split");
        };
        assert!((sizes[0] - 0.2 / 0.7).abs() < 1e-9);
        assert!((sizes[1] - 0.5 / 0.7).abs() < 1e-9);
    }

    #[test]
    fn hidden_active_tab_falls_back_to_first_visible() {
        let layout = LayoutNode::Panel(PanelNode::with_id(
            CHAT_GROUP_ID,
            vec![PanelId::FILES, PanelId::EDITOR, PanelId::TERMINAL],
            1,
        ));
        let rendered = render_tree(&layout, &PanelVisibility::default(), &catalog()).unwrap();
        assert_eq!(rendered.active_panel(), Some(&PanelId::FILES));
        let RenderNode::Tabs { tabs, .. } = &rendered else {
            panic!("expected tabs");
        };
        assert_eq!(tabs.len(), 2);
        assert!(tabs[0].is_active);
        assert_eq!(tabs[1].title, "Terminal");
    }

    #[test]
    fn nothing_visible_renders_nothing() {
        let layout = LayoutNode::Panel(PanelNode::with_id("a", vec![PanelId::PREVIEW], 0));
        assert!(render_tree(&layout, &PanelVisibility::default(), &catalog()).is_none());
    }

    #[test]
    fn rects_tile_bounds_exactly() {
        let layout = LayoutNode::Group(GroupNode::with_id(
            "g",
            Direction::Column,
            vec![
                LayoutNode::Panel(PanelNode::with_id("a", vec![PanelId::CHAT], 0)),
                LayoutNode::Panel(PanelNode::with_id("b", vec![PanelId::FILES], 0)),
                LayoutNode::Panel(PanelNode::with_id("c", vec![PanelId::TERMINAL], 0)),
            ],
            vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
        ));
        let rendered = render_tree(&layout, &PanelVisibility::default(), &catalog()).unwrap();
        let rects = layout_rects(&rendered, Rect::new(0.0, 0.0, 90.0, 100.0));
        let last = rects.last().unwrap().1;
        assert!((last.bottom() - 100.0).abs() < 1e-9);
    }
}
