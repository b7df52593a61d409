//! Tracing integration for structured logging
//!
//! This module wires the `tracing` crate into paneldeck: a one-shot
//! subscriber setup driven by [`TracingConfig`], span macros for layout
//! operations, and the shared span and field names used across the crate.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global flag indicating whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Crate targets enabled by the default filter.
const DEFAULT_TARGETS: [&str; 2] = ["paneldeck_core", "paneldeck_cli"];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// The custom filter directive could not be parsed
    #[error("Invalid filter directive: {0}")]
    InvalidFilter(String),

    /// Tracing already initialized
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// Failed to create log file
    #[error("Failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Tracing log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Errors and warnings (default)
    #[default]
    Warn,
    /// Adds informational messages
    Info,
    /// Adds committed layout changes
    Debug,
    /// Adds actions that did not apply
    Trace,
}

impl TracingLevel {
    /// Converts to tracing crate's Level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Maps a `-v` count onto a level, starting from the default.
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Output destination for tracing logs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr
    #[default]
    Stderr,
    /// Output to a file, truncated on startup
    File {
        /// Path to the log file
        path: PathBuf,
    },
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log level
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Whether to print event targets
    pub include_targets: bool,
    /// Custom filter string (overrides level if set)
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a new tracing configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets whether to print event targets
    #[must_use]
    pub const fn with_targets(mut self, include: bool) -> Self {
        self.include_targets = include;
        self
    }

    /// Sets a custom filter string
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builds the filter directive for this configuration.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        self.filter.clone().unwrap_or_else(|| {
            DEFAULT_TARGETS
                .iter()
                .map(|target| format!("{target}={}", self.level))
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

/// Initializes the tracing subscriber with the given configuration
///
/// This function should be called once at application startup.
/// Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Tracing has already been initialized
/// - The custom filter cannot be parsed
/// - File output is configured but the file cannot be created
/// - The subscriber fails to initialize
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| TracingError::InvalidFilter(e.to_string()))?;

    let (writer, ansi) = match &config.output {
        TracingOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        TracingOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        TracingOutput::File { path } => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            }
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(config.include_targets)
                .with_level(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, "Tracing initialized");

    Ok(())
}

/// Macro for creating operation spans with standard fields
///
/// # Examples
///
/// ```ignore
/// use paneldeck_core::trace_operation;
/// use paneldeck_core::tracing::span_names;
///
/// let _span = trace_operation!(span_names::DND_DROP, panel = %panel).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Macro for creating debug-level operation spans
///
/// Similar to `trace_operation!` but at debug level for frequent operations.
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Standard span names for paneldeck operations
pub mod span_names {
    /// Loading the stored layout
    pub const LAYOUT_LOAD: &str = "layout.load";
    /// Resolving a drop into a layout action
    pub const DND_DROP: &str = "dnd.drop";
    /// Resolving a mobile slot drop
    pub const DND_MOBILE_DROP: &str = "dnd.mobile_drop";
    /// Building drop zones for a drag
    pub const DND_ZONES: &str = "dnd.zones";
    /// Deriving the visible render tree
    pub const RENDER_TREE: &str = "render.tree";
    /// Loading settings
    pub const SETTINGS_LOAD: &str = "settings.load";
}

/// Standard field names for tracing spans and events
pub mod field_names {
    /// Panel id field
    pub const PANEL: &str = "panel";
    /// Node id field
    pub const NODE: &str = "node";
    /// Store action field
    pub const ACTION: &str = "action";
    /// Drop target id field
    pub const TARGET: &str = "target";
    /// Number of nodes in the tree
    pub const NODE_COUNT: &str = "node_count";
    /// Number of drop zones
    pub const ZONE_COUNT: &str = "zone_count";
    /// Error message field
    pub const ERROR: &str = "error";
}
