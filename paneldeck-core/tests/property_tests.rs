//! Property-based tests for the paneldeck layout engine

// Allow common test patterns that Clippy warns about
#![allow(clippy::redundant_clone)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unwrap_used)]

mod properties;
