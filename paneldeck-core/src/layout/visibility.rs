//! Per-panel visibility flags

use serde::{Deserialize, Serialize};

use super::types::{BasePanel, PanelId};

/// Visibility flag for each built-in panel.
///
/// Hidden panels keep their place in the layout tree and reappear there when
/// shown again. Detached panels are always visible. Unknown keys in a stored
/// map are ignored and missing keys take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PanelVisibility {
    /// Chat panel.
    pub chat: bool,
    /// File manager panel.
    pub files: bool,
    /// Editor panel.
    pub editor: bool,
    /// Preview panel.
    pub preview: bool,
    /// Terminal panel.
    pub terminal: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            chat: true,
            files: true,
            editor: false,
            preview: false,
            terminal: true,
        }
    }
}

impl PanelVisibility {
    /// Returns the flag of a built-in panel.
    #[must_use]
    pub const fn get(&self, panel: BasePanel) -> bool {
        match panel {
            BasePanel::Chat => self.chat,
            BasePanel::Files => self.files,
            BasePanel::Editor => self.editor,
            BasePanel::Preview => self.preview,
            BasePanel::Terminal => self.terminal,
        }
    }

    /// Sets the flag of a built-in panel.
    pub fn set(&mut self, panel: BasePanel, visible: bool) {
        let flag = match panel {
            BasePanel::Chat => &mut self.chat,
            BasePanel::Files => &mut self.files,
            BasePanel::Editor => &mut self.editor,
            BasePanel::Preview => &mut self.preview,
            BasePanel::Terminal => &mut self.terminal,
        };
        *flag = visible;
    }

    /// Flips the flag of a built-in panel.
    pub fn toggle(&mut self, panel: BasePanel) {
        self.set(panel, !self.get(panel));
    }

    /// Returns true if the panel should be drawn.
    #[must_use]
    pub const fn is_visible(&self, panel_id: &PanelId) -> bool {
        match panel_id {
            PanelId::Base(panel) => self.get(*panel),
            PanelId::DetachedEditor(_) | PanelId::DetachedTerminal(_) => true,
        }
    }
}
