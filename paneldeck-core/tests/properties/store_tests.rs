//! Property-based tests for the layout store
//!
//! Random action sequences are dispatched to a store. Every committed change
//! must be persisted and announced exactly once, and the persisted snapshot
//! must always restore the live state.

use std::cell::Cell;
use std::rc::Rc;

use paneldeck_core::layout::{BasePanel, NodeId, PanelId, Side, check_invariants};
use paneldeck_core::panels::PanelMenuAction;
use paneldeck_core::settings::LayoutSettings;
use paneldeck_core::store::{
    LayoutStore, MAX_MOBILE_SLOTS, MemoryStorage, MobilePosition, STORAGE_KEY,
};
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

fn panel_strategy() -> impl Strategy<Value = PanelId> {
    prop_oneof![
        Just(PanelId::CHAT),
        Just(PanelId::FILES),
        Just(PanelId::EDITOR),
        Just(PanelId::PREVIEW),
        Just(PanelId::TERMINAL),
        Just(PanelId::detached_editor("t1")),
        Just(PanelId::detached_terminal("x1")),
    ]
}

fn base_strategy() -> impl Strategy<Value = BasePanel> {
    prop_oneof![
        Just(BasePanel::Chat),
        Just(BasePanel::Files),
        Just(BasePanel::Editor),
        Just(BasePanel::Preview),
        Just(BasePanel::Terminal),
    ]
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

fn menu_strategy() -> impl Strategy<Value = PanelMenuAction> {
    prop_oneof![
        Just(PanelMenuAction::SplitOut),
        Just(PanelMenuAction::Hide),
        Just(PanelMenuAction::Reattach),
        Just(PanelMenuAction::CloseDetached),
        Just(PanelMenuAction::ResetLayout),
    ]
}

#[derive(Debug, Clone)]
enum StoreAction {
    Merge(PanelId, usize),
    Split(PanelId, usize, Side),
    Edge(PanelId, Side),
    Activate(PanelId),
    Resize(usize, f64),
    Toggle(BasePanel),
    Reset,
    OpenDetached(PanelId),
    Menu(PanelId, PanelMenuAction),
    OpenMobile(PanelId, bool),
    CloseMobile(PanelId),
    SplitMobile,
    SwapMobile,
}

fn action_strategy() -> impl Strategy<Value = StoreAction> {
    prop_oneof![
        (panel_strategy(), 0usize..8).prop_map(|(p, n)| StoreAction::Merge(p, n)),
        (panel_strategy(), 0usize..8, side_strategy())
            .prop_map(|(p, n, s)| StoreAction::Split(p, n, s)),
        (panel_strategy(), side_strategy()).prop_map(|(p, s)| StoreAction::Edge(p, s)),
        panel_strategy().prop_map(StoreAction::Activate),
        (0usize..8, 0.05..0.95f64).prop_map(|(g, f)| StoreAction::Resize(g, f)),
        base_strategy().prop_map(StoreAction::Toggle),
        Just(StoreAction::Reset),
        panel_strategy().prop_map(StoreAction::OpenDetached),
        (panel_strategy(), menu_strategy()).prop_map(|(p, m)| StoreAction::Menu(p, m)),
        (panel_strategy(), any::<bool>()).prop_map(|(p, top)| StoreAction::OpenMobile(p, top)),
        panel_strategy().prop_map(StoreAction::CloseMobile),
        Just(StoreAction::SplitMobile),
        Just(StoreAction::SwapMobile),
    ]
}

fn nth_tab_group(store: &LayoutStore<MemoryStorage>, n: usize) -> NodeId {
    let groups = store.layout().tab_groups();
    groups[n % groups.len()].id.clone()
}

fn dispatch(store: &mut LayoutStore<MemoryStorage>, action: &StoreAction) -> bool {
    match action {
        StoreAction::Merge(panel, n) => {
            let node = nth_tab_group(store, *n);
            store.merge_panels(panel, &node)
        }
        StoreAction::Split(panel, n, side) => {
            let node = nth_tab_group(store, *n);
            store.split_panel(panel, &node, *side)
        }
        StoreAction::Edge(panel, side) => store.move_panel_to_edge(panel, *side),
        StoreAction::Activate(panel) => match store.layout().find_panel_node(panel) {
            Some(node) => {
                let node = node.id.clone();
                store.set_node_active_tab(&node, panel)
            }
            None => false,
        },
        StoreAction::Resize(n, first) => {
            let Some(group) = store.layout().as_group() else {
                return false;
            };
            let count = group.children.len();
            let id = group.id.clone();
            let rest = (1.0 - first) / (count - 1) as f64;
            let mut sizes = vec![rest; count];
            sizes[n % count] = *first;
            store.update_sizes(&id, &sizes)
        }
        StoreAction::Toggle(panel) => store.toggle_visibility(*panel),
        StoreAction::Reset => store.reset_layout(),
        StoreAction::OpenDetached(panel) => store.open_detached_panel(panel, None),
        StoreAction::Menu(panel, action) => store.apply_menu_action(panel, *action),
        StoreAction::OpenMobile(panel, top) => {
            let position = if *top {
                MobilePosition::Top
            } else {
                MobilePosition::Bottom
            };
            store.open_mobile_panel(panel, position)
        }
        StoreAction::CloseMobile(panel) => store.close_mobile_panel(panel),
        StoreAction::SplitMobile => store.split_mobile(),
        StoreAction::SwapMobile => store.swap_mobile_slots(0, 1),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each committed change is written and announced once; no-ops are
    /// neither written nor announced.
    #[test]
    fn prop_commits_are_persisted_and_announced_once(
        actions in proptest::collection::vec(action_strategy(), 0..30),
    ) {
        let mut store = LayoutStore::load(MemoryStorage::new(), LayoutSettings::default());
        let notified = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&notified);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        let mut changes = 0;
        for action in &actions {
            let before = store.state().clone();
            let changed = dispatch(&mut store, action);
            prop_assert_eq!(changed, store.state() != &before, "action {:?}", action);
            if changed {
                changes += 1;
            }
        }
        prop_assert_eq!(notified.get(), changes);
        prop_assert_eq!(store.storage().writes(), changes);
    }

    /// The live state is always valid, and the stored snapshot restores it.
    #[test]
    fn prop_snapshot_restores_live_state(
        actions in proptest::collection::vec(action_strategy(), 1..30),
    ) {
        let mut store = LayoutStore::load(MemoryStorage::new(), LayoutSettings::default());
        for action in &actions {
            dispatch(&mut store, action);
            prop_assert!(check_invariants(store.layout()).is_empty());
            prop_assert!((1..=MAX_MOBILE_SLOTS).contains(&store.mobile_panels().len()));
        }

        let expected = store.state().clone();
        let storage = store.into_storage();
        if storage.get(STORAGE_KEY).is_some() {
            let restored = LayoutStore::load(storage, LayoutSettings::default());
            prop_assert_eq!(restored.state(), &expected);
        }
    }

    /// Hiding and showing panels never changes the tree.
    #[test]
    fn prop_visibility_never_touches_tree(panels in proptest::collection::vec(base_strategy(), 1..10)) {
        let mut store = LayoutStore::load(MemoryStorage::new(), LayoutSettings::default());
        let tree = store.layout().clone();
        for panel in panels {
            prop_assert!(store.toggle_visibility(panel));
            prop_assert_eq!(store.layout(), &tree);
        }
    }
}
