//! Drop zone geometry
//!
//! While a panel is dragged every visible tab group is divided into five
//! zones: a band along each side (split) and the center (merge). Four rails
//! along the screen edges cover the outer border of the layout area.
//!
//! ```text
//! +--------------------------+
//! |           top            |
//! +------+------------+------+
//! | left |   center   | right|
//! +------+------------+------+
//! |          bottom          |
//! +--------------------------+
//! ```

use crate::geometry::{Point, Rect};
use crate::layout::{LayoutNode, PanelId, Side};
use crate::render::{RenderNode, layout_rects};
use crate::settings::LayoutSettings;
use crate::tracing::{field_names, span_names};

use super::DropTarget;

/// Zone of a tab group a point falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    /// Band along one side (split)
    Side(Side),
    /// Everything else (merge)
    Center,
}

/// A drop region on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    /// What dropping here does.
    pub target: DropTarget,
    /// Where the zone is.
    pub rect: Rect,
}

/// Calculates the zone of a tab group rectangle that contains a point
///
/// The top and bottom bands span the full width and take precedence over
/// the left and right bands, which only cover the middle strip.
///
/// # Arguments
/// * `point` - Pointer position
/// * `rect` - Tab group rectangle
/// * `ratio` - Fraction of the width or height covered by each band
///
/// # Returns
/// The zone, or `None` if the point is outside the rectangle
#[must_use]
pub fn calculate_zone_kind(point: Point, rect: Rect, ratio: f64) -> Option<ZoneKind> {
    if !rect.contains(point) {
        return None;
    }
    let band_h = rect.height * ratio;
    let band_w = rect.width * ratio;
    let kind = if point.y < rect.y + band_h {
        ZoneKind::Side(Side::Top)
    } else if point.y >= rect.bottom() - band_h {
        ZoneKind::Side(Side::Bottom)
    } else if point.x < rect.x + band_w {
        ZoneKind::Side(Side::Left)
    } else if point.x >= rect.right() - band_w {
        ZoneKind::Side(Side::Right)
    } else {
        ZoneKind::Center
    };
    Some(kind)
}

/// Rectangle covered by one zone of a tab group.
#[must_use]
pub fn zone_rect(kind: ZoneKind, rect: Rect, ratio: f64) -> Rect {
    let band_h = rect.height * ratio;
    let band_w = rect.width * ratio;
    let middle_h = rect.height - 2.0 * band_h;
    match kind {
        ZoneKind::Side(Side::Top) => Rect::new(rect.x, rect.y, rect.width, band_h),
        ZoneKind::Side(Side::Bottom) => {
            Rect::new(rect.x, rect.bottom() - band_h, rect.width, band_h)
        }
        ZoneKind::Side(Side::Left) => Rect::new(rect.x, rect.y + band_h, band_w, middle_h),
        ZoneKind::Side(Side::Right) => {
            Rect::new(rect.right() - band_w, rect.y + band_h, band_w, middle_h)
        }
        ZoneKind::Center => Rect::new(
            rect.x + band_w,
            rect.y + band_h,
            rect.width - 2.0 * band_w,
            middle_h,
        ),
    }
}

fn edge_rail(side: Side, bounds: Rect, thickness: f64) -> Rect {
    let t = thickness.min(bounds.width).min(bounds.height);
    match side {
        Side::Left => Rect::new(bounds.x, bounds.y, t, bounds.height),
        Side::Right => Rect::new(bounds.right() - t, bounds.y, t, bounds.height),
        Side::Top => Rect::new(bounds.x, bounds.y, bounds.width, t),
        Side::Bottom => Rect::new(bounds.x, bounds.bottom() - t, bounds.width, t),
    }
}

/// Builds the drop zones for a drag in progress
///
/// Edge rails come first so that they win over the tab group bands they
/// overlap. A tab group gets zones unless it holds nothing but the dragged
/// panel; the dragged panel's own group never gets a center zone.
///
/// # Arguments
/// * `rendered` - Visible tree
/// * `layout` - Stored tree, used to find the dragged panel's group
/// * `bounds` - Layout area
/// * `dragged` - Dragged panel, `None` when no drag is in progress
/// * `settings` - Band ratio and rail thickness
///
/// # Returns
/// Zones in hit-test order; empty when nothing is dragged
#[must_use]
pub fn build_drop_zones(
    rendered: &RenderNode,
    layout: &LayoutNode,
    bounds: Rect,
    dragged: Option<&PanelId>,
    settings: &LayoutSettings,
) -> Vec<DropZone> {
    let Some(dragged) = dragged else {
        return Vec::new();
    };
    let _span = crate::trace_operation_debug!(span_names::DND_ZONES, panel = %dragged).entered();
    let source = layout.find_panel_node(dragged);

    let mut zones: Vec<DropZone> = Side::ALL
        .into_iter()
        .map(|side| DropZone {
            target: DropTarget::Edge(side),
            rect: edge_rail(side, bounds, settings.edge_rail_thickness),
        })
        .collect();

    for (node, rect) in layout_rects(rendered, bounds) {
        let is_source = source.is_some_and(|source| source.id == node);
        if is_source && source.is_some_and(|source| source.panel_ids.len() <= 1) {
            continue;
        }
        for side in Side::ALL {
            zones.push(DropZone {
                target: DropTarget::Split {
                    side,
                    node: node.clone(),
                },
                rect: zone_rect(ZoneKind::Side(side), rect, settings.drop_zone_ratio),
            });
        }
        if !is_source {
            zones.push(DropZone {
                rect: zone_rect(ZoneKind::Center, rect, settings.drop_zone_ratio),
                target: DropTarget::Merge { node },
            });
        }
    }

    tracing::trace!({ field_names::ZONE_COUNT } = zones.len(), "drop zones built");
    zones
}

/// Returns the target of the first zone containing the point.
#[must_use]
pub fn hit_test(zones: &[DropZone], point: Point) -> Option<&DropTarget> {
    zones
        .iter()
        .find(|zone| zone.rect.contains(point))
        .map(|zone| &zone.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::defaults::{CHAT_GROUP_ID, FILES_GROUP_ID, TERMINAL_GROUP_ID};
    use crate::layout::{NodeId, PanelVisibility, default_layout};
    use crate::panels::{EmptyRegistry, PanelCatalog};
    use crate::render::render_tree;

    const BOUNDS: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 500.0,
    };

    fn zones_for(dragged: &PanelId) -> Vec<DropZone> {
        let layout = default_layout();
        let rendered = render_tree(
            &layout,
            &PanelVisibility::default(),
            &PanelCatalog::new(EmptyRegistry),
        )
        .unwrap();
        build_drop_zones(
            &rendered,
            &layout,
            BOUNDS,
            Some(dragged),
            &LayoutSettings::default(),
        )
    }

    fn has(zones: &[DropZone], target: &DropTarget) -> bool {
        zones.iter().any(|zone| &zone.target == target)
    }

    #[test]
    fn zone_kind_bands() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            calculate_zone_kind(Point::new(50.0, 10.0), rect, 0.25),
            Some(ZoneKind::Side(Side::Top))
        );
        assert_eq!(
            calculate_zone_kind(Point::new(10.0, 90.0), rect, 0.25),
            Some(ZoneKind::Side(Side::Bottom))
        );
        assert_eq!(
            calculate_zone_kind(Point::new(10.0, 50.0), rect, 0.25),
            Some(ZoneKind::Side(Side::Left))
        );
        assert_eq!(
            calculate_zone_kind(Point::new(80.0, 50.0), rect, 0.25),
            Some(ZoneKind::Side(Side::Right))
        );
        assert_eq!(
            calculate_zone_kind(Point::new(50.0, 50.0), rect, 0.25),
            Some(ZoneKind::Center)
        );
        assert_eq!(calculate_zone_kind(Point::new(150.0, 50.0), rect, 0.25), None);
    }

    #[test]
    fn zone_rects_agree_with_zone_kind() {
        let rect = Rect::new(20.0, 40.0, 200.0, 120.0);
        for (x, y) in [(25.0, 45.0), (100.0, 150.0), (30.0, 100.0), (210.0, 100.0), (120.0, 100.0)] {
            let point = Point::new(x, y);
            let kind = calculate_zone_kind(point, rect, 0.25).unwrap();
            assert!(zone_rect(kind, rect, 0.25).contains(point), "{kind:?} at {x},{y}");
        }
    }

    #[test]
    fn no_zones_without_drag() {
        let layout = default_layout();
        let rendered = render_tree(
            &layout,
            &PanelVisibility::default(),
            &PanelCatalog::new(EmptyRegistry),
        )
        .unwrap();
        assert!(build_drop_zones(&rendered, &layout, BOUNDS, None, &LayoutSettings::default()).is_empty());
    }

    #[test]
    fn sole_panel_group_has_no_zones_of_its_own() {
        let zones = zones_for(&PanelId::CHAT);
        let chat = NodeId::from(CHAT_GROUP_ID);
        assert!(!zones.iter().any(|zone| zone.target
            == DropTarget::Split {
                side: Side::Left,
                node: chat.clone()
            }));
        assert!(!has(&zones, &DropTarget::Merge { node: chat }));
        assert!(has(
            &zones,
            &DropTarget::Merge {
                node: NodeId::from(TERMINAL_GROUP_ID)
            }
        ));
        assert_eq!(zones.len(), 4 + 5 + 5);
    }

    #[test]
    fn multi_tab_source_group_splits_but_never_merges() {
        let zones = zones_for(&PanelId::FILES);
        let files = NodeId::from(FILES_GROUP_ID);
        assert!(has(
            &zones,
            &DropTarget::Split {
                side: Side::Right,
                node: files.clone()
            }
        ));
        assert!(!has(&zones, &DropTarget::Merge { node: files }));
    }

    #[test]
    fn rails_win_over_bands() {
        let zones = zones_for(&PanelId::TERMINAL);
        assert_eq!(
            hit_test(&zones, Point::new(2.0, 250.0)),
            Some(&DropTarget::Edge(Side::Left))
        );
        assert_eq!(
            hit_test(&zones, Point::new(500.0, 498.0)),
            Some(&DropTarget::Edge(Side::Bottom))
        );
        assert_eq!(
            hit_test(&zones, Point::new(200.0, 250.0)),
            Some(&DropTarget::Merge {
                node: NodeId::from(CHAT_GROUP_ID)
            })
        );
        assert_eq!(hit_test(&zones, Point::new(2000.0, 250.0)), None);
    }
}
