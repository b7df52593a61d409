//! Panel descriptors and collaborator interfaces
//!
//! The layout engine never looks inside a panel. It asks a
//! [`PanelContentProvider`] for a title and an icon, and a
//! [`DetachedRegistry`] for the state of detached editors and terminals,
//! which are owned elsewhere.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::layout::{BasePanel, PanelId, TabId, TerminalId};

/// Icon shown next to a panel title. Opaque to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelIcon {
    /// Speech bubble
    Chat,
    /// Folder
    Folder,
    /// Source code
    Code,
    /// Eye
    Preview,
    /// Terminal prompt
    Terminal,
    /// Single document
    File,
}

/// What a tab strip needs to show for a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    /// Short display title.
    pub title: String,
    /// Icon next to the title.
    pub icon: PanelIcon,
}

impl PanelDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(title: impl Into<String>, icon: PanelIcon) -> Self {
        Self {
            title: title.into(),
            icon,
        }
    }
}

/// Supplies titles and icons. Must answer for every panel id.
pub trait PanelContentProvider {
    /// Describes a panel.
    fn descriptor(&self, panel: &PanelId) -> PanelDescriptor;
}

/// State of a detached editor or terminal, owned outside the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedInfo {
    /// File path of an editor, or label of a terminal.
    pub display_name: String,
    /// True when the editor has unsaved changes.
    pub is_modified: bool,
}

/// Lookup of detached editors and terminals.
pub trait DetachedRegistry {
    /// Looks up a detached editor by its editor tab.
    fn detached_editor(&self, tab: &TabId) -> Option<DetachedInfo>;

    /// Looks up a detached terminal by its instance.
    fn detached_terminal(&self, instance: &TerminalId) -> Option<DetachedInfo>;

    /// Looks up any detached panel. Built-in panels return `None`.
    fn lookup(&self, panel: &PanelId) -> Option<DetachedInfo> {
        match panel {
            PanelId::Base(_) => None,
            PanelId::DetachedEditor(tab) => self.detached_editor(tab),
            PanelId::DetachedTerminal(instance) => self.detached_terminal(instance),
        }
    }
}

/// Registry that knows no detached panels.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl DetachedRegistry for EmptyRegistry {
    fn detached_editor(&self, _tab: &TabId) -> Option<DetachedInfo> {
        None
    }

    fn detached_terminal(&self, _instance: &TerminalId) -> Option<DetachedInfo> {
        None
    }
}

/// Registry backed by two maps.
#[derive(Debug, Clone, Default)]
pub struct DetachedDirectory {
    editors: HashMap<TabId, DetachedInfo>,
    terminals: HashMap<TerminalId, DetachedInfo>,
}

impl DetachedDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a detached editor.
    pub fn insert_editor(&mut self, tab: TabId, info: DetachedInfo) {
        self.editors.insert(tab, info);
    }

    /// Records a detached terminal.
    pub fn insert_terminal(&mut self, instance: TerminalId, info: DetachedInfo) {
        self.terminals.insert(instance, info);
    }
}

impl DetachedRegistry for DetachedDirectory {
    fn detached_editor(&self, tab: &TabId) -> Option<DetachedInfo> {
        self.editors.get(tab).cloned()
    }

    fn detached_terminal(&self, instance: &TerminalId) -> Option<DetachedInfo> {
        self.terminals.get(instance).cloned()
    }
}

/// Default provider: fixed titles for built-in panels, file names for
/// detached editors.
#[derive(Debug, Clone, Default)]
pub struct PanelCatalog<R> {
    registry: R,
}

impl<R: DetachedRegistry> PanelCatalog<R> {
    /// Creates a catalog backed by a registry.
    #[must_use]
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The registry behind the catalog.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R: DetachedRegistry> PanelContentProvider for PanelCatalog<R> {
    fn descriptor(&self, panel: &PanelId) -> PanelDescriptor {
        match panel {
            PanelId::Base(base) => base_descriptor(*base),
            PanelId::DetachedEditor(tab) => {
                let title = self
                    .registry
                    .detached_editor(tab)
                    .map_or_else(|| "Editor".to_owned(), |info| file_name(&info.display_name));
                PanelDescriptor::new(title, PanelIcon::File)
            }
            PanelId::DetachedTerminal(_) => PanelDescriptor::new("Terminal", PanelIcon::Terminal),
        }
    }
}

fn base_descriptor(panel: BasePanel) -> PanelDescriptor {
    match panel {
        BasePanel::Chat => PanelDescriptor::new("Chat", PanelIcon::Chat),
        BasePanel::Files => PanelDescriptor::new("File Manager", PanelIcon::Folder),
        BasePanel::Editor => PanelDescriptor::new("Editor", PanelIcon::Code),
        BasePanel::Preview => PanelDescriptor::new("Preview", PanelIcon::Preview),
        BasePanel::Terminal => PanelDescriptor::new("Terminal", PanelIcon::Terminal),
    }
}

/// Last component of a `/` or `\` separated path.
fn file_name(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or(path)
        .to_owned()
}

/// True when closing the panel should ask first: a detached editor with
/// unsaved changes.
#[must_use]
pub fn close_requires_confirmation(panel: &PanelId, registry: &impl DetachedRegistry) -> bool {
    match panel {
        PanelId::DetachedEditor(tab) => registry
            .detached_editor(tab)
            .is_some_and(|info| info.is_modified),
        PanelId::Base(_) | PanelId::DetachedTerminal(_) => false,
    }
}

// ============================================================================
// Context Menu
// ============================================================================

/// Entries of a panel's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelMenuAction {
    /// Pull the panel out of a shared tab group into its own split.
    SplitOut,
    /// Hide a built-in panel.
    Hide,
    /// Return a detached panel to the panel it came from.
    Reattach,
    /// Close a detached panel.
    CloseDetached,
    /// Restore the default layout.
    ResetLayout,
}

impl PanelMenuAction {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SplitOut => "split-out",
            Self::Hide => "hide",
            Self::Reattach => "reattach",
            Self::CloseDetached => "close-detached",
            Self::ResetLayout => "reset-layout",
        }
    }

    /// Menu label for a panel with the given title.
    #[must_use]
    pub fn label(self, title: &str) -> String {
        match self {
            Self::SplitOut => "Open in Separate Panel".to_owned(),
            Self::Hide => format!("Hide {title}"),
            Self::Reattach => "Return to File Manager".to_owned(),
            Self::CloseDetached => "Close Tab".to_owned(),
            Self::ResetLayout => "Reset Layout".to_owned(),
        }
    }
}

impl fmt::Display for PanelMenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PanelMenuAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split-out" => Ok(Self::SplitOut),
            "hide" => Ok(Self::Hide),
            "reattach" => Ok(Self::Reattach),
            "close-detached" => Ok(Self::CloseDetached),
            "reset-layout" => Ok(Self::ResetLayout),
            _ => Err(()),
        }
    }
}

/// Context-menu entries for a panel, in display order.
///
/// Detached panels offer reattach and close. Built-in panels offer hide, and
/// split-out when they share a tab group. Reset is always last.
#[must_use]
pub fn menu_actions(panel: &PanelId, is_multi_tab: bool) -> Vec<PanelMenuAction> {
    let mut actions = Vec::with_capacity(3);
    if panel.is_detached() {
        actions.push(PanelMenuAction::Reattach);
        actions.push(PanelMenuAction::CloseDetached);
    } else {
        if is_multi_tab {
            actions.push(PanelMenuAction::SplitOut);
        }
        actions.push(PanelMenuAction::Hide);
    }
    actions.push(PanelMenuAction::ResetLayout);
    actions
}
