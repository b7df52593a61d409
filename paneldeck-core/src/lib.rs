//! `Paneldeck` Core Library
//!
//! This crate provides the panel layout engine of a multi-panel workspace:
//! a tree of tab groups that users rearrange by dragging panels onto edges,
//! onto other tab groups or into tab strips.
//!
//! # Crate Structure
//!
//! - [`layout`] - Layout tree, pure tree operations and the default layout
//! - [`store`] - Owned layout state, persistence and change notification
//! - [`dnd`] - Drag activation, drop zones and drop dispatch
//! - [`render`] - Visible render tree and tab group geometry
//! - [`panels`] - Panel titles, detached panel lookup and context menus
//! - [`settings`] - TOML settings for the drag-and-drop layer
//! - [`tracing`] - Structured logging setup

#![warn(missing_docs)]

pub mod dnd;
pub mod geometry;
pub mod layout;
pub mod panels;
pub mod render;
pub mod settings;
pub mod store;
pub mod tracing;

pub use dnd::{
    DragController, DropAction, DropTarget, DropZone, InputKind, SensorSettings, build_drop_zones,
    classify_drop, handle_drag_end, handle_drag_start, handle_mobile_drag_end, hit_test,
};
pub use geometry::{Point, Rect};
pub use layout::{
    BasePanel, Direction, GroupNode, LayoutNode, NodeId, PanelId, PanelNode, PanelVisibility,
    Side, check_invariants, default_layout, find_panel_node,
};
pub use panels::{
    DetachedInfo, DetachedRegistry, PanelCatalog, PanelContentProvider, PanelDescriptor,
    PanelIcon, PanelMenuAction, menu_actions,
};
pub use render::{RenderNode, TabView, layout_rects, render_tree};
pub use settings::{LayoutSettings, SettingsError, default_config_dir};
pub use store::{
    FileStorage, LayoutSnapshot, LayoutState, LayoutStorage, LayoutStore, MemoryStorage,
    MobilePanels, MobilePosition, STORAGE_KEY,
};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
