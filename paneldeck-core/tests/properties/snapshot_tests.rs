//! Tests for loading persisted layout snapshots
//!
//! Stored snapshots come from older versions and hand edits. Loading must
//! never fail: unknown fields are ignored, drift is tolerated until the next
//! write, and anything structurally broken falls back to the defaults.

use paneldeck_core::layout::{InvariantViolation, NodeId, PanelId, PanelVisibility, SIZE_EPSILON, default_layout};
use paneldeck_core::settings::LayoutSettings;
use paneldeck_core::store::{
    FileStorage, LayoutSnapshot, LayoutState, LayoutStorage, LayoutStore, MemoryStorage,
    STORAGE_KEY,
};
use proptest::prelude::*;

fn load(json: &str) -> LayoutStore<MemoryStorage> {
    LayoutStore::load(
        MemoryStorage::with_entry(STORAGE_KEY, json),
        LayoutSettings::default(),
    )
}

const TWO_COLUMNS: &str = r#"{"type":"group","id":"g","direction":"row","sizes":[0.5,0.5],
    "children":[{"type":"panel","id":"L","panelIds":["chat","editor"],"activeIndex":0},
                {"type":"panel","id":"R","panelIds":["files"],"activeIndex":0}]}"#;

#[test]
fn unknown_visibility_field_is_ignored() {
    let json = format!(
        r#"{{"layout":{TWO_COLUMNS},
            "visibility":{{"chat":true,"files":false,"editor":true,"preview":false,
                           "terminal":true,"minimap":true}},
            "mobilePanels":["files"]}}"#
    );
    let store = load(&json);
    assert_eq!(store.layout().id(), &NodeId::from("g"));
    assert!(!store.visibility().files);
    assert!(store.visibility().editor);
    assert_eq!(store.mobile_panels().as_slice(), &[PanelId::FILES]);
}

#[test]
fn unknown_top_level_field_is_ignored() {
    let json = format!(r#"{{"layout":{TWO_COLUMNS},"theme":"dark","version":3}}"#);
    assert_eq!(load(&json).layout().id(), &NodeId::from("g"));
}

#[test]
fn drifted_sizes_load_and_heal_on_next_write() {
    let json = format!(
        r#"{{"layout":{}}}"#,
        TWO_COLUMNS.replace("[0.5,0.5]", "[0.45,0.45]")
    );
    let mut store = load(&json);
    assert_eq!(store.layout().as_group().unwrap().sizes, vec![0.45, 0.45]);
    assert_eq!(store.storage().writes(), 0);

    assert!(store.set_node_active_tab(&NodeId::from("L"), &PanelId::EDITOR));
    let sizes = &store.layout().as_group().unwrap().sizes;
    assert!((sizes.iter().sum::<f64>() - 1.0).abs() < SIZE_EPSILON);
    assert!((sizes[0] - 0.5).abs() < SIZE_EPSILON);

    let stored = store.storage().get(STORAGE_KEY).unwrap();
    let reloaded = LayoutSnapshot::from_json(stored).unwrap();
    assert_eq!(&reloaded.layout, store.layout());
}

#[test]
fn broken_snapshots_fall_back_to_defaults() {
    for json in [
        "",
        "{",
        "null",
        r#"{"visibility":{"chat":true}}"#,
        r#"{"layout":{"type":"panel","id":"a","panelIds":[]}}"#,
        r#"{"layout":{"type":"panel","id":"a","panelIds":["sidebar"]}}"#,
        r#"{"layout":{"type":"group","id":"g","direction":"row","sizes":[1.0],
            "children":[{"type":"panel","id":"a","panelIds":["chat"]},
                        {"type":"panel","id":"b","panelIds":["files"]}]}}"#,
    ] {
        let store = load(json);
        assert_eq!(store.state(), &LayoutState::default(), "input {json:?}");
        assert_eq!(store.storage().writes(), 0);
    }
}

#[test]
fn panel_less_tree_falls_back_to_a_usable_layout() {
    let mut store = load(r#"{"layout":{"type":"group","id":"g","direction":"row","sizes":[],"children":[]}}"#);
    assert_eq!(store.layout(), &default_layout());
    assert!(store.merge_panels(&PanelId::TERMINAL, &NodeId::from("chat-group")));
    assert!(store.move_panel_to_edge(&PanelId::FILES, paneldeck_core::Side::Top));
}

#[test]
fn file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = LayoutStore::load(FileStorage::new(dir.path()), LayoutSettings::default());
    assert!(store.merge_panels(&PanelId::TERMINAL, &NodeId::from("chat-group")));
    assert!(store.toggle_visibility(paneldeck_core::BasePanel::Preview));
    let expected = store.state().clone();
    drop(store);

    let restored = LayoutStore::load(FileStorage::new(dir.path()), LayoutSettings::default());
    assert_eq!(restored.state(), &expected);
    assert_ne!(restored.layout(), &default_layout());
}

#[test]
fn corrupt_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.save(STORAGE_KEY, "{\"layout\": 42}").unwrap();
    let store = LayoutStore::load(storage, LayoutSettings::default());
    assert_eq!(store.visibility(), &PanelVisibility::default());
    assert_eq!(store.layout(), &default_layout());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Arbitrary text in storage never makes loading fail.
    #[test]
    fn prop_loading_arbitrary_text_never_panics(text in ".{0,200}") {
        let store = load(&text);
        let structural: Vec<_> = paneldeck_core::check_invariants(store.layout())
            .into_iter()
            .filter(InvariantViolation::is_structural)
            .collect();
        prop_assert!(structural.is_empty());
    }
}
