//! CLI error types and exit codes.

use paneldeck_core::layout::PanelIdError;
use paneldeck_core::settings::SettingsError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, invalid arguments, I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// A panel, node or slot named on the command line does not exist
    pub const NOT_FOUND: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings file could not be loaded
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Panel not in the layout
    #[error("Panel not found: {0}")]
    PanelNotFound(String),

    /// Node not in the layout
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Mobile slot out of range
    #[error("Mobile slot not found: {0}")]
    SlotNotFound(usize),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PanelIdError> for CliError {
    fn from(err: PanelIdError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, arguments, serialization, IO)
    /// - 2: Target not found (panel, node or mobile slot)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::PanelNotFound(_) | Self::NodeNotFound(_) | Self::SlotNotFound(_) => {
                exit_codes::NOT_FOUND
            }
            Self::Settings(_) | Self::InvalidArgument(_) | Self::Serialization(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
