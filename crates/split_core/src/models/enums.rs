//! Core enums used throughout the engine.

use serde::{Deserialize, Serialize};

/// Policy for split boundaries that land past the end of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// A boundary past the source duration aborts resolution.
    Strict,
    /// A boundary past the source duration is reported as a warning and
    /// resolution proceeds.
    #[default]
    Lenient,
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryPolicy::Strict => write!(f, "strict"),
            BoundaryPolicy::Lenient => write!(f, "lenient"),
        }
    }
}
