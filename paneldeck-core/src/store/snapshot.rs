//! Persisted layout snapshot
//!
//! The snapshot is the JSON document written after every committed change:
//!
//! ```json
//! {
//!   "layout": { "type": "group", "id": "root", "direction": "row", ... },
//!   "visibility": { "chat": true, "files": true, ... },
//!   "mobilePanels": ["chat"],
//!   "savedAt": "2026-01-01T12:00:00Z"
//! }
//! ```
//!
//! Only `layout` is required. A snapshot that cannot be parsed or whose tree
//! is structurally broken is rejected as a whole; the store then starts from
//! the default layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LayoutState;
use super::mobile::MobilePanels;
use crate::layout::{InvariantViolation, LayoutNode, PanelId, PanelVisibility, check_invariants};

/// Storage key of the snapshot. Bumped whenever the schema changes
/// incompatibly so that old snapshots are ignored.
pub const STORAGE_KEY: &str = "paneldeck-layout-v5";

/// Reasons a stored snapshot is rejected.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not JSON, or not the expected shape.
    #[error("failed to parse layout snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but the tree breaks a structural invariant.
    #[error("layout snapshot is structurally invalid: {}", describe(.0))]
    Invalid(Vec<InvariantViolation>),
}

fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// On-disk form of [`LayoutState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// The layout tree.
    pub layout: LayoutNode,
    /// Visibility flags; missing keys take their default.
    #[serde(default)]
    pub visibility: PanelVisibility,
    /// Mobile slot list, validated when converted into a state.
    #[serde(default)]
    pub mobile_panels: Vec<PanelId>,
    /// When the snapshot was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl LayoutSnapshot {
    /// Captures a state, stamped with the current time.
    #[must_use]
    pub fn capture(state: &LayoutState) -> Self {
        Self {
            layout: state.layout.clone(),
            visibility: state.visibility,
            mobile_panels: state.mobile_panels.clone().into(),
            saved_at: Some(Utc::now()),
        }
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses and validates a snapshot.
    ///
    /// Unknown fields are ignored. Size drift, stale active indices and
    /// single-child groups are tolerated and repaired by the next write.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] for malformed JSON and
    /// [`SnapshotError::Invalid`] for a structurally broken tree.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the tree for violations that cannot be repaired.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Invalid`] with every structural violation.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let structural: Vec<_> = check_invariants(&self.layout)
            .into_iter()
            .filter(InvariantViolation::is_structural)
            .collect();
        if structural.is_empty() {
            Ok(())
        } else {
            Err(SnapshotError::Invalid(structural))
        }
    }

    /// Converts the snapshot into a live state.
    ///
    /// An invalid mobile slot list is replaced by the default.
    #[must_use]
    pub fn into_state(self) -> LayoutState {
        let mobile_panels = MobilePanels::try_from(self.mobile_panels).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding stored mobile panels");
            MobilePanels::default()
        });
        LayoutState {
            layout: self.layout,
            visibility: self.visibility,
            mobile_panels,
        }
    }
}
