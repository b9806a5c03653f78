//! Split structures: raw declarations, resolved segments, the final plan.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::format::Encoding;
use crate::metadata::CanonicalMetadata;

/// One user-declared cut point, immutable once parsed from input.
///
/// Only `start` is required; `end` and `duration` are alternative ways to
/// bound the segment, and the metadata map carries arbitrary tag fields in
/// whatever spelling the input used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSplit {
    /// Start timestamp as text (required).
    pub start: String,
    /// End timestamp as text (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Segment duration as text (optional, alternative to `end`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Raw metadata fields, keys as spelled in the input.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl RawSplit {
    /// Create a new raw split at the given start timestamp.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            ..Self::default()
        }
    }

    /// Set the end timestamp.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Add a raw metadata field.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// One fully resolved output unit, consumed read-only by transcoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSegment {
    /// 1-based track position, assigned by declaration order.
    pub index: u32,
    /// Segment start in seconds.
    pub start_secs: f64,
    /// Segment end in seconds; always greater than `start_secs`.
    pub end_secs: f64,
    /// Canonicalized metadata for tagging.
    pub metadata: CanonicalMetadata,
    /// Derived filesystem-safe output filename, without extension.
    pub output_filename: String,
}

impl ResolvedSegment {
    /// Segment length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// A non-fatal finding collected during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolveWarning {
    /// A segment boundary lies past the end of the source recording.
    BoundaryPastEnd {
        /// 1-based split position.
        split: u32,
        /// The offending boundary in seconds.
        boundary_secs: f64,
        /// Total source duration in seconds.
        total_secs: f64,
    },
}

impl std::fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveWarning::BoundaryPastEnd {
                split,
                boundary_secs,
                total_secs,
            } => write!(
                f,
                "split {}: boundary {:.3}s is past the source end ({:.3}s)",
                split, boundary_secs, total_secs
            ),
        }
    }
}

/// The complete resolved plan handed to the transcoding frontend.
///
/// Segments preserve declaration order, which is also chronological; a plan
/// is only ever returned whole, never partially resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    /// Resolved segments in declaration order.
    pub segments: Vec<ResolvedSegment>,
    /// Selected output encoding for every segment.
    pub encoding: Encoding,
    /// Non-fatal findings collected during resolution.
    pub warnings: Vec<ResolveWarning>,
}

impl SplitPlan {
    /// Number of segments in the plan.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan contains no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments in track order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedSegment> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_split_builder_works() {
        let split = RawSplit::new("00:00:00")
            .with_end("00:03:00")
            .with_tag("title", "Intro");
        assert_eq!(split.start, "00:00:00");
        assert_eq!(split.end.as_deref(), Some("00:03:00"));
        assert!(split.duration.is_none());
        assert_eq!(split.metadata.get("title").map(String::as_str), Some("Intro"));
    }

    #[test]
    fn segment_duration_is_end_minus_start() {
        let seg = ResolvedSegment {
            index: 1,
            start_secs: 10.0,
            end_secs: 25.5,
            metadata: CanonicalMetadata::new(),
            output_filename: "1".to_string(),
        };
        assert!((seg.duration_secs() - 15.5).abs() < 1e-9);
    }
}
