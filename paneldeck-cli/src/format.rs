//! Plain-text renderings of layouts, render trees and drop zones.

use std::fmt::Write as _;

use paneldeck_core::dnd::DropZone;
use paneldeck_core::geometry::Rect;
use paneldeck_core::layout::{LayoutNode, NodeId, PanelVisibility};
use paneldeck_core::render::RenderNode;

/// Formats the stored tree, one node per line. The active tab is starred
/// and hidden panels are marked.
pub fn layout_tree(layout: &LayoutNode, visibility: &PanelVisibility) -> String {
    let mut out = String::new();
    write_layout(&mut out, layout, visibility, 0, None);
    out
}

fn write_layout(
    out: &mut String,
    node: &LayoutNode,
    visibility: &PanelVisibility,
    depth: usize,
    size: Option<f64>,
) {
    let indent = "  ".repeat(depth);
    let size = size.map(|s| format!("[{s:.2}] ")).unwrap_or_default();
    match node {
        LayoutNode::Panel(panel) => {
            let tabs: Vec<String> = panel
                .panel_ids
                .iter()
                .enumerate()
                .map(|(index, id)| {
                    let marker = if index == panel.active_index { "*" } else { "" };
                    let hidden = if visibility.is_visible(id) { "" } else { " (hidden)" };
                    format!("{marker}{id}{hidden}")
                })
                .collect();
            let _ = writeln!(out, "{indent}{size}panel {}: {}", panel.id, tabs.join(", "));
        }
        LayoutNode::Group(group) => {
            let _ = writeln!(out, "{indent}{size}group {} ({})", group.id, group.direction);
            for (child, size) in group.children.iter().zip(&group.sizes) {
                write_layout(out, child, visibility, depth + 1, Some(*size));
            }
        }
    }
}

/// Formats the visible tree with the rectangle of every tab group.
pub fn render_tree(node: &RenderNode, rects: &[(NodeId, Rect)]) -> String {
    let mut out = String::new();
    write_render(&mut out, node, rects, 0);
    out
}

fn write_render(out: &mut String, node: &RenderNode, rects: &[(NodeId, Rect)], depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        RenderNode::Split {
            group,
            direction,
            children,
            ..
        } => {
            let _ = writeln!(out, "{indent}split {group} ({direction})");
            for child in children {
                write_render(out, child, rects, depth + 1);
            }
        }
        RenderNode::Tabs { node, tabs, .. } => {
            let titles: Vec<String> = tabs
                .iter()
                .map(|tab| {
                    let marker = if tab.is_active { "*" } else { "" };
                    format!("{marker}{}", tab.title)
                })
                .collect();
            let rect = rects
                .iter()
                .find(|(id, _)| id == node)
                .map(|(_, rect)| format!(" @ {}", rect_str(rect)))
                .unwrap_or_default();
            let _ = writeln!(out, "{indent}tabs {node}{rect}: {}", titles.join(" | "));
        }
    }
}

/// Formats drop zones, one per line in hit-test order.
pub fn zones(zones: &[DropZone]) -> String {
    let mut out = String::new();
    for zone in zones {
        let _ = writeln!(out, "{:<40} {}", zone.target.to_string(), rect_str(&zone.rect));
    }
    out
}

fn rect_str(rect: &Rect) -> String {
    format!(
        "{:.0},{:.0} {:.0}x{:.0}",
        rect.x, rect.y, rect.width, rect.height
    )
}
