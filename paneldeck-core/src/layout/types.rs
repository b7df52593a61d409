//! Core type definitions for the panel layout
//!
//! This module contains the identifier types and small enums used
//! throughout the layout engine. Panel identifiers are decoded from their
//! wire strings once, at the serialization boundary, so the rest of the
//! engine matches on variants instead of string prefixes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Wire prefix of a detached editor panel id.
pub const DETACHED_EDITOR_PREFIX: &str = "detached-editor:";

/// Wire prefix of a detached terminal panel id.
pub const DETACHED_TERMINAL_PREFIX: &str = "detached-terminal:";

/// Unique identifier for a node in the layout tree.
///
/// Node ids are minted once when a node is created and are never handed to
/// a different node. Persisted layouts may carry arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Mints a fresh, process-unique node id.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("node-{}", Uuid::new_v4().simple()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of built-in panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasePanel {
    /// Conversation with the coding agent.
    Chat,
    /// File manager.
    Files,
    /// Main code editor.
    Editor,
    /// Preview of running services.
    Preview,
    /// Main terminal.
    Terminal,
}

impl BasePanel {
    /// All base panels, in toolbar order.
    pub const ALL: [Self; 5] = [
        Self::Chat,
        Self::Files,
        Self::Editor,
        Self::Preview,
        Self::Terminal,
    ];

    /// Returns the wire name of the panel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Files => "files",
            Self::Editor => "editor",
            Self::Preview => "preview",
            Self::Terminal => "terminal",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.as_str() == value)
    }
}

impl fmt::Display for BasePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an editor tab owned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub String);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a terminal instance owned by the terminal registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub String);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a content slot in the layout.
///
/// Panel ids are the uniqueness key of the layout tree: a panel id appears
/// in at most one tab group at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelId {
    /// One of the built-in panels.
    Base(BasePanel),
    /// An editor tab pulled out of the file manager into its own panel.
    DetachedEditor(TabId),
    /// A terminal instance pulled out into its own panel.
    DetachedTerminal(TerminalId),
}

impl PanelId {
    /// Shorthand for the chat panel.
    pub const CHAT: Self = Self::Base(BasePanel::Chat);
    /// Shorthand for the file manager panel.
    pub const FILES: Self = Self::Base(BasePanel::Files);
    /// Shorthand for the editor panel.
    pub const EDITOR: Self = Self::Base(BasePanel::Editor);
    /// Shorthand for the preview panel.
    pub const PREVIEW: Self = Self::Base(BasePanel::Preview);
    /// Shorthand for the terminal panel.
    pub const TERMINAL: Self = Self::Base(BasePanel::Terminal);

    /// Creates a detached editor panel id for the given editor tab.
    #[must_use]
    pub fn detached_editor(tab_id: impl Into<String>) -> Self {
        Self::DetachedEditor(TabId(tab_id.into()))
    }

    /// Creates a detached terminal panel id for the given terminal instance.
    #[must_use]
    pub fn detached_terminal(instance_id: impl Into<String>) -> Self {
        Self::DetachedTerminal(TerminalId(instance_id.into()))
    }

    /// Returns the base panel, if this is one.
    #[must_use]
    pub const fn as_base(&self) -> Option<BasePanel> {
        match self {
            Self::Base(panel) => Some(*panel),
            Self::DetachedEditor(_) | Self::DetachedTerminal(_) => None,
        }
    }

    /// Returns true for detached editor and terminal panels.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        !matches!(self, Self::Base(_))
    }
}

impl From<BasePanel> for PanelId {
    fn from(panel: BasePanel) -> Self {
        Self::Base(panel)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(panel) => f.write_str(panel.as_str()),
            Self::DetachedEditor(tab) => write!(f, "{DETACHED_EDITOR_PREFIX}{tab}"),
            Self::DetachedTerminal(instance) => write!(f, "{DETACHED_TERMINAL_PREFIX}{instance}"),
        }
    }
}

/// Errors produced when decoding a panel id from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelIdError {
    /// The string names no known panel.
    #[error("unknown panel id: {0}")]
    Unknown(String),

    /// A detached panel id without its embedded key.
    #[error("detached panel id has an empty key: {0}")]
    EmptyKey(String),
}

impl FromStr for PanelId {
    type Err = PanelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(tab) = s.strip_prefix(DETACHED_EDITOR_PREFIX) {
            if tab.is_empty() {
                return Err(PanelIdError::EmptyKey(s.to_owned()));
            }
            return Ok(Self::detached_editor(tab));
        }
        if let Some(instance) = s.strip_prefix(DETACHED_TERMINAL_PREFIX) {
            if instance.is_empty() {
                return Err(PanelIdError::EmptyKey(s.to_owned()));
            }
            return Ok(Self::detached_terminal(instance));
        }
        BasePanel::from_wire(s)
            .map(Self::Base)
            .ok_or_else(|| PanelIdError::Unknown(s.to_owned()))
    }
}

impl Serialize for PanelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PanelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Axis along which a group lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children side by side, left to right.
    Row,
    /// Children stacked, top to bottom.
    Column,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// A side of a tab group or of the whole screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the target.
    Top,
    /// Below the target.
    Bottom,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
}

impl Side {
    /// All sides, in drop-zone order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The group direction a split on this side produces.
    #[must_use]
    pub const fn axis(self) -> Direction {
        match self {
            Self::Top | Self::Bottom => Direction::Column,
            Self::Left | Self::Right => Direction::Row,
        }
    }

    /// True when the new node goes before the target (top or left).
    #[must_use]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }

    /// Returns the wire name of the side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// Screen edge that receives a new column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    /// New column on the far left.
    Left,
    /// New column on the far right.
    Right,
}

/// Screen edge that receives a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    /// New row at the very top.
    Top,
    /// New row at the very bottom.
    Bottom,
}
