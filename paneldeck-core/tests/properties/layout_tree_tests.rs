//! Property-based tests for the layout tree operations
//!
//! Random operation sequences are applied to the default layout. Every
//! reachable tree must keep its structural invariants and panel uniqueness.

use proptest::prelude::*;
use paneldeck_core::layout::{
    self, BasePanel, Direction, GroupNode, LayoutNode, NodeId, PanelId, PanelNode, Side,
    check_invariants, clone_tree, default_layout, find_panel_node,
};

// ============================================================================
// Test Strategies
// ============================================================================

/// Panels that may appear in a tree, including two detached ones
fn panel_pool() -> Vec<PanelId> {
    let mut pool: Vec<PanelId> = BasePanel::ALL.into_iter().map(PanelId::Base).collect();
    pool.push(PanelId::detached_editor("tab-1"));
    pool.push(PanelId::detached_terminal("term-1"));
    pool
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

/// Operations addressed by index; indices are resolved against the tree at
/// the time the operation runs.
#[derive(Debug, Clone)]
enum TreeOperation {
    Merge { panel: usize, node: usize, at: Option<usize> },
    Split { panel: usize, node: usize, side: Side },
    Edge { panel: usize, side: Side, share: f64 },
    Activate { panel: usize, node: usize },
    Reorder { node: usize, from: usize, to: usize },
    Resize { node: usize, sizes: Vec<f64> },
    Remove { panel: usize },
    Insert { panel: usize, node: usize },
    OpenAtEdge { panel: usize, side: Side },
}

fn operation_strategy() -> impl Strategy<Value = TreeOperation> {
    prop_oneof![
        (0usize..16, 0usize..16, proptest::option::of(0usize..5))
            .prop_map(|(panel, node, at)| TreeOperation::Merge { panel, node, at }),
        (0usize..16, 0usize..16, side_strategy())
            .prop_map(|(panel, node, side)| TreeOperation::Split { panel, node, side }),
        (0usize..16, side_strategy(), -0.5..1.5f64)
            .prop_map(|(panel, side, share)| TreeOperation::Edge { panel, side, share }),
        (0usize..16, 0usize..16).prop_map(|(panel, node)| TreeOperation::Activate { panel, node }),
        (0usize..16, 0usize..5, 0usize..5)
            .prop_map(|(node, from, to)| TreeOperation::Reorder { node, from, to }),
        (0usize..16, proptest::collection::vec(-1.0..3.0f64, 1..5))
            .prop_map(|(node, sizes)| TreeOperation::Resize { node, sizes }),
        (0usize..16).prop_map(|panel| TreeOperation::Remove { panel }),
        (0usize..16, 0usize..16).prop_map(|(panel, node)| TreeOperation::Insert { panel, node }),
        (0usize..16, side_strategy()).prop_map(|(panel, side)| TreeOperation::OpenAtEdge { panel, side }),
    ]
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    (!items.is_empty()).then(|| items[index % items.len()].clone())
}

fn tab_group_ids(tree: &LayoutNode) -> Vec<NodeId> {
    tree.tab_groups().into_iter().map(|node| node.id.clone()).collect()
}

fn group_ids(tree: &LayoutNode) -> Vec<NodeId> {
    fn walk(node: &LayoutNode, out: &mut Vec<NodeId>) {
        if let LayoutNode::Group(group) = node {
            out.push(group.id.clone());
            for child in &group.children {
                walk(child, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(tree, &mut out);
    out
}

/// Applies one operation; `None` means the operation did not apply.
fn apply(tree: &LayoutNode, op: &TreeOperation) -> Option<LayoutNode> {
    let present = tree.panel_ids();
    let pool = panel_pool();
    let absent: Vec<PanelId> = pool.into_iter().filter(|p| !present.contains(p)).collect();
    let nodes = tab_group_ids(tree);
    match op {
        TreeOperation::Merge { panel, node, at } => {
            let panel = pick(&present, *panel)?;
            let node = pick(&nodes, *node)?;
            match at {
                Some(index) => layout::merge_panel_into_node_at(tree, &panel, &node, *index),
                None => layout::merge_panel_into_node(tree, &panel, &node),
            }
        }
        TreeOperation::Split { panel, node, side } => {
            let panel = pick(&present, *panel)?;
            let node = pick(&nodes, *node)?;
            layout::split_panel_at_node(tree, &panel, &node, *side)
        }
        TreeOperation::Edge { panel, side, share } => {
            let panel = pick(&present, *panel)?;
            layout::move_panel_to_edge(tree, &panel, *side, *share)
        }
        TreeOperation::Activate { panel, node } => {
            let panel = pick(&present, *panel)?;
            let node = pick(&nodes, *node)?;
            layout::set_node_active_tab(tree, &node, &panel)
        }
        TreeOperation::Reorder { node, from, to } => {
            let node = pick(&nodes, *node)?;
            layout::move_tab_within_node(tree, &node, *from, *to)
        }
        TreeOperation::Resize { node, sizes } => {
            let group = pick(&group_ids(tree), *node)?;
            layout::update_group_sizes(tree, &group, sizes)
        }
        TreeOperation::Remove { panel } => {
            let panel = pick(&present, *panel)?;
            layout::remove_panel(tree, &panel)
        }
        TreeOperation::Insert { panel, node } => {
            let panel = pick(&absent, *panel)?;
            let node = pick(&nodes, *node)?;
            layout::insert_panel(tree, &panel, &node)
        }
        TreeOperation::OpenAtEdge { panel, side } => {
            let panel = pick(&absent, *panel)?;
            layout::open_panel_at_edge(tree, &panel, *side, layout::EDGE_PANEL_SHARE)
        }
    }
}

fn run(ops: &[TreeOperation]) -> Vec<LayoutNode> {
    let mut trees = vec![default_layout()];
    let mut tree = default_layout();
    for op in ops {
        if let Some(next) = apply(&tree, op) {
            tree = next;
            trees.push(tree.clone());
        }
    }
    trees
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every reachable tree satisfies the structural invariants: non-empty
    /// tab groups, groups with at least two children and matching sizes
    /// summing to one, unique node ids.
    #[test]
    fn prop_reachable_trees_are_valid(ops in proptest::collection::vec(operation_strategy(), 0..40)) {
        for tree in run(&ops) {
            let violations = check_invariants(&tree);
            prop_assert!(violations.is_empty(), "violations {:?} in {:?}", violations, tree);
        }
    }

    /// Each panel id appears in at most one tab group, at most once.
    #[test]
    fn prop_panel_ids_are_unique(ops in proptest::collection::vec(operation_strategy(), 0..40)) {
        for tree in run(&ops) {
            let mut ids = tree.panel_ids();
            let total = ids.len();
            ids.sort_by_key(ToString::to_string);
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }

    /// `find_panel_node` finds exactly the panels the tree holds.
    #[test]
    fn prop_find_panel_node_iff_present(ops in proptest::collection::vec(operation_strategy(), 0..30)) {
        let tree = run(&ops).pop().unwrap();
        let present = tree.panel_ids();
        for panel in panel_pool() {
            let found = find_panel_node(&tree, &panel);
            prop_assert_eq!(found.is_some(), present.contains(&panel));
            if let Some(node) = found {
                prop_assert!(node.contains(&panel));
            }
        }
    }

    /// Activating a tab twice yields the same tree both times.
    #[test]
    fn prop_set_active_tab_is_idempotent(
        ops in proptest::collection::vec(operation_strategy(), 0..30),
        pick_index in 0usize..16,
    ) {
        let tree = run(&ops).pop().unwrap();
        let panels = tree.panel_ids();
        let panel = &panels[pick_index % panels.len()];
        let node = find_panel_node(&tree, panel).unwrap().id.clone();
        let once = layout::set_node_active_tab(&tree, &node, panel).unwrap();
        let twice = layout::set_node_active_tab(&once, &node, panel).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.find_tab_group(&node).unwrap().active_panel(), Some(panel));
    }

    /// A clone is equal in value and independent of the original.
    #[test]
    fn prop_clone_is_deep(ops in proptest::collection::vec(operation_strategy(), 0..30)) {
        let tree = run(&ops).pop().unwrap();
        let snapshot = tree.clone();
        let mut copy = clone_tree(&tree);
        prop_assert_eq!(&copy, &tree);

        match &mut copy {
            LayoutNode::Panel(panel) => panel.panel_ids.clear(),
            LayoutNode::Group(group) => group.children.clear(),
        }
        prop_assert_eq!(&tree, &snapshot);
        prop_assert_ne!(&copy, &tree);
    }

    /// Merging a panel into the group that holds only it changes nothing.
    #[test]
    fn prop_self_merge_is_noop(ops in proptest::collection::vec(operation_strategy(), 0..30)) {
        let tree = run(&ops).pop().unwrap();
        for node in tree.tab_groups() {
            for panel in &node.panel_ids {
                prop_assert!(layout::merge_panel_into_node(&tree, panel, &node.id).is_none());
            }
        }
    }

    /// Splitting the only panel of a single-panel tree is never valid, but
    /// splitting either tab of a two-tab root always yields a two-child
    /// group along the side's axis.
    #[test]
    fn prop_split_two_tab_root(side in side_strategy(), which in 0usize..2) {
        let tree = LayoutNode::Panel(PanelNode::with_id(
            "A",
            vec![PanelId::CHAT, PanelId::FILES],
            0,
        ));
        let panel = [PanelId::CHAT, PanelId::FILES][which].clone();
        let next = layout::split_panel_at_node(&tree, &panel, &NodeId::from("A"), side).unwrap();
        let group = next.as_group().unwrap();
        prop_assert_eq!(group.direction, side.axis());
        prop_assert_eq!(group.children.len(), 2);
        prop_assert_eq!(&group.sizes, &vec![0.5, 0.5]);
        prop_assert!(check_invariants(&next).is_empty());
    }
}

// ============================================================================
// Boundary behaviour
// ============================================================================

#[test]
fn removing_second_to_last_tab_keeps_the_node() {
    let tree = LayoutNode::Group(GroupNode::with_id(
        "g",
        Direction::Row,
        vec![
            LayoutNode::Panel(PanelNode::with_id(
                "a",
                vec![PanelId::CHAT, PanelId::detached_editor("t")],
                1,
            )),
            LayoutNode::Panel(PanelNode::with_id("b", vec![PanelId::FILES], 0)),
        ],
        vec![0.5, 0.5],
    ));
    let next = layout::remove_panel(&tree, &PanelId::detached_editor("t")).unwrap();
    let node = next.find_tab_group(&NodeId::from("a")).unwrap();
    assert_eq!(node.panel_ids, vec![PanelId::CHAT]);
    assert_eq!(node.active_index, 0);
}

#[test]
fn splitting_a_lone_panel_beside_itself_is_noop() {
    let tree = LayoutNode::Panel(PanelNode::with_id("A", vec![PanelId::CHAT], 0));
    for side in Side::ALL {
        assert!(layout::split_panel_at_node(&tree, &PanelId::CHAT, &NodeId::from("A"), side).is_none());
    }
}
