//! Data models for the split planning engine.
//!
//! This module contains the core data structures passed between the engine
//! and its collaborators:
//! - Enums for boundary policy
//! - Media facts supplied by the inspection frontend
//! - Split structures (raw declarations, resolved segments, the final plan)

mod enums;
mod media;
mod splits;

// Re-export all public types
pub use enums::BoundaryPolicy;
pub use media::AudioDescriptor;
pub use splits::{RawSplit, ResolveWarning, ResolvedSegment, SplitPlan};
