//! Split Core - planning engine for Audio Splitter
//!
//! This crate contains the split-plan resolution logic with no CLI or
//! media-decoding dependencies. It turns raw split declarations plus the
//! source recording's duration into a validated, ordered plan of segments
//! that a transcoding frontend can execute.

pub mod config;
pub mod declarations;
pub mod format;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod naming;
pub mod resolver;
pub mod timestamp;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
