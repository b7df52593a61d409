//! Property-based tests for drop target ids and drop zone geometry

use paneldeck_core::dnd::{
    DropTarget, ZoneKind, build_drop_zones, calculate_zone_kind, classify_drop, hit_test,
    mobile_drag_handle, parse_mobile_drag_handle,
};
use paneldeck_core::geometry::{Point, Rect};
use paneldeck_core::layout::{NodeId, PanelId, PanelVisibility, Side, default_layout};
use paneldeck_core::panels::{EmptyRegistry, PanelCatalog};
use paneldeck_core::render::{layout_rects, render_tree};
use paneldeck_core::settings::LayoutSettings;
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

/// Node ids as minted at runtime and as found in old snapshots
fn node_id_strategy() -> impl Strategy<Value = NodeId> {
    prop_oneof![
        Just(NodeId::new()),
        "[a-z][a-z0-9-]{0,20}".prop_map(NodeId::from),
    ]
}

fn target_strategy() -> impl Strategy<Value = DropTarget> {
    prop_oneof![
        side_strategy().prop_map(DropTarget::Edge),
        (side_strategy(), node_id_strategy())
            .prop_map(|(side, node)| DropTarget::Split { side, node }),
        node_id_strategy().prop_map(|node| DropTarget::Merge { node }),
        (0usize..20, node_id_strategy()).prop_map(|(index, node)| DropTarget::Tab { index, node }),
        (0usize..2).prop_map(DropTarget::MobileSlot),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatting a target and parsing it back yields the same target, even
    /// for node ids that contain dashes.
    #[test]
    fn prop_drop_target_ids_parse_back(target in target_strategy()) {
        let id = target.to_string();
        prop_assert_eq!(id.parse::<DropTarget>(), Ok(target));
    }

    /// Mobile drag handles parse back to their slot.
    #[test]
    fn prop_mobile_handles_parse_back(slot in 0usize..100) {
        prop_assert_eq!(parse_mobile_drag_handle(&mobile_drag_handle(slot)), Some(slot));
    }

    /// Every point of a rectangle falls in exactly the zone whose rectangle
    /// contains it.
    #[test]
    fn prop_zone_kind_matches_zone_rect(
        x in 0.0..1.0f64,
        y in 0.0..1.0f64,
        width in 40.0..2000.0f64,
        height in 40.0..2000.0f64,
        ratio in 0.05..0.45f64,
    ) {
        let rect = Rect::new(10.0, 20.0, width, height);
        let point = Point::new(rect.x + x * width, rect.y + y * height);
        let kind = calculate_zone_kind(point, rect, ratio).unwrap();
        let kinds = [
            ZoneKind::Side(Side::Top),
            ZoneKind::Side(Side::Bottom),
            ZoneKind::Side(Side::Left),
            ZoneKind::Side(Side::Right),
            ZoneKind::Center,
        ];
        let containing: Vec<_> = kinds
            .into_iter()
            .filter(|k| paneldeck_core::dnd::zones::zone_rect(*k, rect, ratio).contains(point))
            .collect();
        prop_assert_eq!(containing, vec![kind]);
    }

    /// Inside the layout area every hit classifies into an applicable action,
    /// and only the dragged panel's own group has gaps.
    #[test]
    fn prop_hits_inside_bounds_resolve(
        x in 0.0..1.0f64,
        y in 0.0..1.0f64,
        dragged in prop_oneof![Just(PanelId::CHAT), Just(PanelId::FILES), Just(PanelId::TERMINAL)],
    ) {
        let layout = default_layout();
        let rendered = render_tree(
            &layout,
            &PanelVisibility::default(),
            &PanelCatalog::new(EmptyRegistry),
        )
        .unwrap();
        let bounds = Rect::new(0.0, 0.0, 1200.0, 800.0);
        let zones = build_drop_zones(&rendered, &layout, bounds, Some(&dragged), &LayoutSettings::default());
        let point = Point::new(x * bounds.width, y * bounds.height);

        let source = layout.find_panel_node(&dragged).unwrap();
        let in_source = layout_rects(&rendered, bounds)
            .iter()
            .any(|(id, rect)| id == &source.id && rect.contains(point));

        match hit_test(&zones, point) {
            Some(target) => {
                prop_assert!(classify_drop(&layout, &dragged, target).is_some(), "{}", target);
            }
            None => prop_assert!(in_source, "no zone at {:?}", point),
        }
    }
}
