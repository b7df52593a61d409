//! Mobile slot list
//!
//! On narrow screens the tree is not rendered. Instead one or two stacked
//! slots each show a single panel. The operations here are pure: they
//! return the next slot list, or `None` when nothing changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{BasePanel, PanelId, PanelVisibility};

/// Maximum number of stacked mobile slots.
pub const MAX_MOBILE_SLOTS: usize = 2;

/// Where a newly opened mobile panel goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobilePosition {
    /// Upper slot.
    Top,
    /// Lower slot.
    Bottom,
}

impl MobilePosition {
    const fn slot(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

/// Reasons a slot list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MobileSlotsError {
    /// No slots at all.
    #[error("mobile layout needs at least one panel")]
    Empty,

    /// More than [`MAX_MOBILE_SLOTS`] slots.
    #[error("mobile layout holds at most {MAX_MOBILE_SLOTS} panels, got {0}")]
    TooMany(usize),

    /// The same panel in both slots.
    #[error("panel {0} is shown twice")]
    Duplicate(PanelId),
}

/// Ordered list of one or two distinct panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PanelId>", into = "Vec<PanelId>")]
pub struct MobilePanels(Vec<PanelId>);

impl Default for MobilePanels {
    fn default() -> Self {
        Self(vec![PanelId::CHAT])
    }
}

impl TryFrom<Vec<PanelId>> for MobilePanels {
    type Error = MobileSlotsError;

    fn try_from(panels: Vec<PanelId>) -> Result<Self, Self::Error> {
        match panels.as_slice() {
            [] => Err(MobileSlotsError::Empty),
            [first, second] if first == second => Err(MobileSlotsError::Duplicate(first.clone())),
            [_] | [_, _] => Ok(Self(panels)),
            _ => Err(MobileSlotsError::TooMany(panels.len())),
        }
    }
}

impl From<MobilePanels> for Vec<PanelId> {
    fn from(panels: MobilePanels) -> Self {
        panels.0
    }
}

impl fmt::Display for MobilePanels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, panel) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{panel}")?;
        }
        Ok(())
    }
}

impl MobilePanels {
    /// Creates a single-slot list.
    #[must_use]
    pub fn single(panel: PanelId) -> Self {
        Self(vec![panel])
    }

    /// Returns the panels in slot order.
    #[must_use]
    pub fn as_slice(&self) -> &[PanelId] {
        &self.0
    }

    /// Number of slots, one or two.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the panel in a slot.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&PanelId> {
        self.0.get(slot)
    }

    /// Returns the slot showing a panel.
    #[must_use]
    pub fn slot_of(&self, panel: &PanelId) -> Option<usize> {
        self.0.iter().position(|p| p == panel)
    }

    /// Opens a panel in the top or bottom slot.
    ///
    /// A panel that is already shown swaps the two slots when both are in
    /// use. With a free slot the panel is added above or below the current
    /// one; otherwise it replaces the chosen slot.
    #[must_use]
    pub fn open(&self, panel: &PanelId, position: MobilePosition) -> Option<Self> {
        if self.slot_of(panel).is_some() {
            return (self.len() == MAX_MOBILE_SLOTS).then(|| self.swapped(0, 1));
        }
        let mut panels = self.0.clone();
        if panels.len() < MAX_MOBILE_SLOTS {
            match position {
                MobilePosition::Top => panels.insert(0, panel.clone()),
                MobilePosition::Bottom => panels.push(panel.clone()),
            }
        } else {
            panels[position.slot()] = panel.clone();
        }
        Some(Self(panels))
    }

    /// Closes the slot showing a panel. The last slot never closes.
    #[must_use]
    pub fn close(&self, panel: &PanelId) -> Option<Self> {
        if self.len() <= 1 {
            return None;
        }
        let index = self.slot_of(panel)?;
        let mut panels = self.0.clone();
        panels.remove(index);
        Some(Self(panels))
    }

    /// Shows a panel in a slot, swapping with the other slot if it is
    /// already shown there.
    #[must_use]
    pub fn select_tab(&self, slot: usize, panel: &PanelId) -> Option<Self> {
        let current = self.get(slot)?;
        if current == panel {
            return None;
        }
        match self.slot_of(panel) {
            Some(other) => Some(self.swapped(slot, other)),
            None => {
                let mut panels = self.0.clone();
                panels[slot] = panel.clone();
                Some(Self(panels))
            }
        }
    }

    /// Adds a second slot showing the first visible built-in panel that is
    /// not already shown.
    #[must_use]
    pub fn split(&self, visibility: &PanelVisibility) -> Option<Self> {
        if self.len() >= MAX_MOBILE_SLOTS {
            return None;
        }
        let candidate = BasePanel::ALL
            .into_iter()
            .filter(|panel| visibility.get(*panel))
            .map(PanelId::Base)
            .find(|panel| self.slot_of(panel).is_none())?;
        let mut panels = self.0.clone();
        panels.push(candidate);
        Some(Self(panels))
    }

    /// Swaps two slots.
    #[must_use]
    pub fn swap(&self, a: usize, b: usize) -> Option<Self> {
        if a == b || a >= self.len() || b >= self.len() {
            return None;
        }
        Some(self.swapped(a, b))
    }

    /// Drops a panel that no longer exists, falling back to the default
    /// list when it was the only slot.
    #[must_use]
    pub fn without(&self, panel: &PanelId) -> Option<Self> {
        self.slot_of(panel)?;
        Some(self.close(panel).unwrap_or_default())
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut panels = self.0.clone();
        panels.swap(a, b);
        Self(panels)
    }
}
