//! Media facts supplied by the inspection frontend.

use serde::{Deserialize, Serialize};

/// Facts about the source recording, read-only to the engine.
///
/// Produced by the media-inspection frontend (typically an ffprobe run);
/// the engine never opens the file itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioDescriptor {
    /// Total duration of the recording in seconds.
    pub total_duration_secs: f64,
    /// Source codec as a lowercase short identifier (e.g. "flac", "mp3").
    pub source_codec: String,
}

impl AudioDescriptor {
    /// Create a new descriptor.
    pub fn new(total_duration_secs: f64, source_codec: impl Into<String>) -> Self {
        Self {
            total_duration_secs,
            source_codec: source_codec.into(),
        }
    }
}
