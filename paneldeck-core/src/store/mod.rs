//! Layout store
//!
//! [`LayoutStore`] owns the live layout state: the tree, the visibility
//! flags and the mobile slot list. It is the only place a new tree is
//! installed. Every action computes the next state with a pure operation,
//! replaces the current state in one step, writes the snapshot to storage
//! and notifies subscribers.
//!
//! Actions return `true` when the state changed. An action that does not
//! apply leaves the state, the storage and the subscribers untouched.
//!
//! # Example
//!
//! ```
//! use paneldeck_core::layout::{NodeId, PanelId};
//! use paneldeck_core::settings::LayoutSettings;
//! use paneldeck_core::store::{LayoutStore, MemoryStorage};
//!
//! let mut store = LayoutStore::load(MemoryStorage::new(), LayoutSettings::default());
//! assert!(store.merge_panels(&PanelId::TERMINAL, &NodeId::from("chat-group")));
//! assert!(!store.merge_panels(&PanelId::TERMINAL, &NodeId::from("chat-group")));
//! ```

pub mod mobile;
pub mod snapshot;
pub mod storage;

pub use mobile::{MAX_MOBILE_SLOTS, MobilePanels, MobilePosition, MobileSlotsError};
pub use snapshot::{LayoutSnapshot, STORAGE_KEY, SnapshotError};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage, StorageError, StorageResult};

use std::fmt;

use crate::layout::{
    self, BasePanel, LayoutNode, NodeId, PanelId, PanelVisibility, Side, default_layout,
    default_visibility,
};
use crate::panels::PanelMenuAction;
use crate::settings::LayoutSettings;
use crate::tracing::{field_names, span_names};

/// The persisted part of the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    /// Desktop layout tree.
    pub layout: LayoutNode,
    /// Visibility flags of the built-in panels.
    pub visibility: PanelVisibility,
    /// Mobile slot list.
    pub mobile_panels: MobilePanels,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            visibility: default_visibility(),
            mobile_panels: MobilePanels::default(),
        }
    }
}

/// Drag gesture in progress. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    /// True between drag activation and drop.
    pub is_dragging: bool,
    /// The panel being dragged.
    pub dragged_panel: Option<PanelId>,
}

/// Handle returned by [`LayoutStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&LayoutState)>;

/// Owner of the live layout state.
pub struct LayoutStore<S: LayoutStorage> {
    state: LayoutState,
    drag: DragState,
    settings: LayoutSettings,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: LayoutStorage> fmt::Debug for LayoutStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutStore")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: LayoutStorage> LayoutStore<S> {
    /// Creates a store from the snapshot in `storage`.
    ///
    /// A missing snapshot, or one that cannot be read, parsed or validated,
    /// yields the default state. Nothing is written until the first change.
    pub fn load(storage: S, settings: LayoutSettings) -> Self {
        let _span =
            crate::trace_operation_debug!(span_names::LAYOUT_LOAD, key = STORAGE_KEY).entered();
        let state = match storage.load(STORAGE_KEY) {
            Ok(Some(json)) => match LayoutSnapshot::from_json(&json) {
                Ok(snapshot) => {
                    tracing::debug!(key = STORAGE_KEY, "restored layout snapshot");
                    snapshot.into_state()
                }
                Err(err) => {
                    tracing::warn!(key = STORAGE_KEY, error = %err, "discarding stored layout");
                    LayoutState::default()
                }
            },
            Ok(None) => LayoutState::default(),
            Err(err) => {
                tracing::warn!(key = STORAGE_KEY, error = %err, "failed to read stored layout");
                LayoutState::default()
            }
        };
        Self::with_state(storage, settings, state)
    }

    /// Creates a store with an explicit initial state.
    pub fn with_state(storage: S, settings: LayoutSettings, state: LayoutState) -> Self {
        Self {
            state,
            drag: DragState::default(),
            settings,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Current layout tree.
    #[must_use]
    pub const fn layout(&self) -> &LayoutNode {
        &self.state.layout
    }

    /// Current visibility flags.
    #[must_use]
    pub const fn visibility(&self) -> &PanelVisibility {
        &self.state.visibility
    }

    /// Current mobile slot list.
    #[must_use]
    pub const fn mobile_panels(&self) -> &MobilePanels {
        &self.state.mobile_panels
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Settings the store was created with.
    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and returns the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // ========================================================================
    // Subscribers
    // ========================================================================

    /// Registers a callback invoked after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&LayoutState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    // ========================================================================
    // Tree Actions
    // ========================================================================

    /// Moves a panel into another tab group.
    pub fn merge_panels(&mut self, panel: &PanelId, target: &NodeId) -> bool {
        tracing::debug!(
            { field_names::PANEL } = %panel,
            { field_names::NODE } = %target,
            "merge panel"
        );
        let next = layout::merge_panel_into_node(&self.state.layout, panel, target);
        self.commit_layout("merge_panels", next)
    }

    /// Moves a panel into another tab group at a tab position.
    pub fn merge_panels_at(&mut self, panel: &PanelId, target: &NodeId, index: usize) -> bool {
        tracing::debug!(
            { field_names::PANEL } = %panel,
            { field_names::NODE } = %target,
            index,
            "merge panel at tab position"
        );
        let next = layout::merge_panel_into_node_at(&self.state.layout, panel, target, index);
        self.commit_layout("merge_panels_at", next)
    }

    /// Pulls a panel out into its own tab group beside a target.
    pub fn split_panel(&mut self, panel: &PanelId, target: &NodeId, side: Side) -> bool {
        tracing::debug!(
            { field_names::PANEL } = %panel,
            { field_names::NODE } = %target,
            %side,
            "split panel"
        );
        let next = layout::split_panel_at_node(&self.state.layout, panel, target, side);
        self.commit_layout("split_panel", next)
    }

    /// Makes a panel the foreground tab of a tab group.
    pub fn set_node_active_tab(&mut self, node: &NodeId, panel: &PanelId) -> bool {
        tracing::debug!(
            { field_names::PANEL } = %panel,
            { field_names::NODE } = %node,
            "activate tab"
        );
        let next = layout::set_node_active_tab(&self.state.layout, node, panel);
        self.commit_layout("set_node_active_tab", next)
    }

    /// Moves a panel to a screen edge.
    pub fn move_panel_to_edge(&mut self, panel: &PanelId, edge: Side) -> bool {
        let next = layout::move_panel_to_edge(
            &self.state.layout,
            panel,
            edge,
            self.settings.edge_panel_share,
        );
        self.commit_layout("move_panel_to_edge", next)
    }

    /// Stores the sizes of a group after a resize.
    pub fn update_sizes(&mut self, group: &NodeId, sizes: &[f64]) -> bool {
        tracing::debug!({ field_names::NODE } = %group, ?sizes, "resize group");
        let next = layout::update_group_sizes(&self.state.layout, group, sizes);
        self.commit_layout("update_sizes", next)
    }

    /// Reorders a tab within its tab group.
    pub fn move_tab(&mut self, node: &NodeId, from: usize, to: usize) -> bool {
        tracing::debug!({ field_names::NODE } = %node, from, to, "move tab");
        let next = layout::move_tab_within_node(&self.state.layout, node, from, to);
        self.commit_layout("move_tab", next)
    }

    /// Flips the visibility of a built-in panel. The tree is not touched.
    pub fn toggle_visibility(&mut self, panel: BasePanel) -> bool {
        let mut next = self.state.clone();
        next.visibility.toggle(panel);
        tracing::debug!(
            { field_names::PANEL } = %panel,
            visible = next.visibility.get(panel),
            "toggled panel visibility"
        );
        self.commit("toggle_visibility", next)
    }

    /// Restores the default tree and visibility. Mobile slots are kept.
    pub fn reset_layout(&mut self) -> bool {
        let next = LayoutState {
            layout: default_layout(),
            visibility: default_visibility(),
            mobile_panels: self.state.mobile_panels.clone(),
        };
        self.commit("reset_layout", next)
    }

    // ========================================================================
    // Detached Panels
    // ========================================================================

    /// Shows a detached editor or terminal.
    ///
    /// A panel already in the tree is brought to the front. A new panel
    /// joins `target` when given, else the tab group of its parent panel
    /// (file manager for editors, terminal for terminals), else a new column
    /// on the right.
    pub fn open_detached_panel(&mut self, panel: &PanelId, target: Option<&NodeId>) -> bool {
        if !panel.is_detached() {
            return false;
        }
        let tree = &self.state.layout;
        if let Some(node) = tree.find_panel_node(panel) {
            let node = node.id.clone();
            return self.set_node_active_tab(&node, panel);
        }

        let anchor = target.cloned().or_else(|| {
            tree.find_panel_node(&home_panel(panel))
                .map(|node| node.id.clone())
        });
        let next = match anchor {
            Some(node) => layout::insert_panel(tree, panel, &node),
            None => layout::open_panel_at_edge(
                tree,
                panel,
                Side::Right,
                self.settings.edge_panel_share,
            ),
        };
        self.commit_layout("open_detached_panel", next)
    }

    /// Removes a detached panel from the tree and the mobile slots.
    pub fn remove_detached_panel(&mut self, panel: &PanelId) -> bool {
        if !panel.is_detached() {
            return false;
        }
        let mut next = self.state.clone();
        let mut changed = false;
        if let Some(layout) = layout::remove_panel(&next.layout, panel) {
            next.layout = layout;
            changed = true;
        }
        if let Some(mobile) = next.mobile_panels.without(panel) {
            next.mobile_panels = mobile;
            changed = true;
        }
        if !changed {
            tracing::trace!({ field_names::PANEL } = %panel, "detached panel not present");
            return false;
        }
        self.commit("remove_detached_panel", next)
    }

    /// Returns a detached panel to the panel it was pulled out of.
    ///
    /// The detached panel is removed and its parent panel is shown and
    /// brought to the front.
    pub fn reattach_panel(&mut self, panel: &PanelId) -> bool {
        if !panel.is_detached() {
            return false;
        }
        let Some(layout) = layout::remove_panel(&self.state.layout, panel) else {
            return false;
        };
        let mut next = self.state.clone();
        next.layout = layout;
        if let Some(mobile) = next.mobile_panels.without(panel) {
            next.mobile_panels = mobile;
        }

        let home = home_panel(panel);
        if let Some(base) = home.as_base() {
            next.visibility.set(base, true);
        }
        if let Some(node) = next.layout.find_panel_node(&home).map(|n| n.id.clone()) {
            if let Some(layout) = layout::set_node_active_tab(&next.layout, &node, &home) {
                next.layout = layout;
            }
        }
        self.commit("reattach_panel", next)
    }

    /// Closes a panel: built-in panels are hidden, detached panels removed.
    pub fn close_panel(&mut self, panel: &PanelId) -> bool {
        match panel.as_base() {
            Some(base) if self.state.visibility.get(base) => self.toggle_visibility(base),
            Some(_) => false,
            None => self.remove_detached_panel(panel),
        }
    }

    /// Runs a panel context-menu action.
    pub fn apply_menu_action(&mut self, panel: &PanelId, action: PanelMenuAction) -> bool {
        match action {
            PanelMenuAction::SplitOut => match self.state.layout.find_panel_node(panel) {
                Some(node) => {
                    let node = node.id.clone();
                    self.split_panel(panel, &node, Side::Right)
                }
                None => false,
            },
            PanelMenuAction::Hide => match panel.as_base() {
                Some(base) => self.toggle_visibility(base),
                None => false,
            },
            PanelMenuAction::Reattach => self.reattach_panel(panel),
            PanelMenuAction::CloseDetached => self.remove_detached_panel(panel),
            PanelMenuAction::ResetLayout => self.reset_layout(),
        }
    }

    // ========================================================================
    // Mobile Actions
    // ========================================================================

    /// Replaces the mobile slot list.
    pub fn set_mobile_panels(&mut self, panels: MobilePanels) -> bool {
        self.commit_mobile("set_mobile_panels", Some(panels))
    }

    /// Opens a panel in a mobile slot.
    pub fn open_mobile_panel(&mut self, panel: &PanelId, position: MobilePosition) -> bool {
        let next = self.state.mobile_panels.open(panel, position);
        self.commit_mobile("open_mobile_panel", next)
    }

    /// Closes a mobile slot. The last slot stays open.
    pub fn close_mobile_panel(&mut self, panel: &PanelId) -> bool {
        let next = self.state.mobile_panels.close(panel);
        self.commit_mobile("close_mobile_panel", next)
    }

    /// Shows a panel in a mobile slot, swapping slots if needed.
    pub fn select_mobile_tab(&mut self, slot: usize, panel: &PanelId) -> bool {
        let next = self.state.mobile_panels.select_tab(slot, panel);
        self.commit_mobile("select_mobile_tab", next)
    }

    /// Adds a second mobile slot.
    pub fn split_mobile(&mut self) -> bool {
        let next = self.state.mobile_panels.split(&self.state.visibility);
        self.commit_mobile("split_mobile", next)
    }

    /// Swaps two mobile slots.
    pub fn swap_mobile_slots(&mut self, a: usize, b: usize) -> bool {
        let next = self.state.mobile_panels.swap(a, b);
        self.commit_mobile("swap_mobile_slots", next)
    }

    // ========================================================================
    // Drag State
    // ========================================================================

    /// Records the panel being dragged, or clears the drag with `None`.
    ///
    /// Drag state is not persisted and does not notify subscribers.
    pub fn set_dragging(&mut self, panel: Option<PanelId>) {
        self.drag = DragState {
            is_dragging: panel.is_some(),
            dragged_panel: panel,
        };
    }

    // ========================================================================
    // Commit
    // ========================================================================

    fn commit_layout(&mut self, action: &'static str, next: Option<LayoutNode>) -> bool {
        match next {
            Some(layout) => {
                let next = LayoutState {
                    layout,
                    ..self.state.clone()
                };
                self.commit(action, next)
            }
            None => {
                tracing::trace!({ field_names::ACTION } = action, "layout action did not apply");
                false
            }
        }
    }

    fn commit_mobile(&mut self, action: &'static str, next: Option<MobilePanels>) -> bool {
        match next {
            Some(mobile_panels) => {
                let next = LayoutState {
                    mobile_panels,
                    ..self.state.clone()
                };
                self.commit(action, next)
            }
            None => {
                tracing::trace!({ field_names::ACTION } = action, "mobile action did not apply");
                false
            }
        }
    }

    /// Normalizes the tree of `next`, then installs and persists it if it
    /// differs from the current state.
    fn commit(&mut self, action: &'static str, next: LayoutState) -> bool {
        let LayoutState {
            layout: tree,
            visibility,
            mobile_panels,
        } = next;
        let next = LayoutState {
            layout: layout::normalize(tree).unwrap_or_else(default_layout),
            visibility,
            mobile_panels,
        };
        if next == self.state {
            tracing::trace!({ field_names::ACTION } = action, "state unchanged");
            return false;
        }
        self.state = next;
        tracing::debug!(
            { field_names::ACTION } = action,
            { field_names::NODE_COUNT } = self.state.layout.node_count(),
            "layout state committed"
        );
        self.persist();
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        true
    }

    fn persist(&mut self) {
        let json = match LayoutSnapshot::capture(&self.state).to_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize layout snapshot");
                return;
            }
        };
        if let Err(err) = self.storage.save(STORAGE_KEY, &json) {
            tracing::warn!(key = STORAGE_KEY, error = %err, "failed to persist layout snapshot");
        }
    }
}

/// The built-in panel a detached panel belongs to.
fn home_panel(panel: &PanelId) -> PanelId {
    match panel {
        PanelId::DetachedTerminal(_) => PanelId::TERMINAL,
        PanelId::Base(_) | PanelId::DetachedEditor(_) => PanelId::FILES,
    }
}
