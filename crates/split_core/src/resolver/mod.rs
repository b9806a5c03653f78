//! Split plan resolution and validation.
//!
//! Turns a list of raw split declarations plus the source descriptor into a
//! complete, validated [`SplitPlan`]. Resolution runs in full before any
//! segment is materialized; a fatal finding aborts the whole call so the
//! transcoding frontend can never see a partial or inconsistent plan.

use thiserror::Error;
use tracing::{debug, warn};

use crate::format;
use crate::metadata;
use crate::models::{
    AudioDescriptor, BoundaryPolicy, RawSplit, ResolveWarning, ResolvedSegment, SplitPlan,
};
use crate::naming;
use crate::timestamp::{parse_timestamp, TimestampError};

/// Errors that abort plan resolution.
///
/// Split positions in messages are 1-based, matching the track index the
/// segment would have received.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// A declared timestamp failed to parse.
    #[error("split {split}: invalid {field} timestamp: {source}")]
    InvalidTimestamp {
        split: u32,
        field: &'static str,
        #[source]
        source: TimestampError,
    },

    /// A segment resolved to zero or negative length. Guards against
    /// reversed or duplicate timestamps.
    #[error("split {split}: segment is empty ({start_secs:.3}s .. {end_secs:.3}s)")]
    EmptySegment {
        split: u32,
        start_secs: f64,
        end_secs: f64,
    },

    /// A split's start precedes the previous split's start.
    #[error("split {split}: start {start_secs:.3}s precedes previous start {prev_start_secs:.3}s")]
    OutOfOrderStart {
        split: u32,
        start_secs: f64,
        prev_start_secs: f64,
    },

    /// A boundary exceeds the source duration (strict policy only).
    #[error("split {split}: boundary {boundary_secs:.3}s exceeds source duration {total_secs:.3}s")]
    DurationExceeded {
        split: u32,
        boundary_secs: f64,
        total_secs: f64,
    },
}

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Caller-supplied knobs for one resolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    /// What to do when a boundary lands past the source end.
    pub boundary_policy: BoundaryPolicy,
    /// Naming pattern for output filenames.
    pub pattern: String,
    /// Requested output format ("auto" or a concrete format name).
    pub requested_format: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            boundary_policy: BoundaryPolicy::default(),
            pattern: "%n - %t".to_string(),
            requested_format: "auto".to_string(),
        }
    }
}

/// Resolve raw split declarations into a complete plan.
///
/// Per split, the end time is the first of: the declared `end`, the declared
/// `start + duration`, the next split's declared start, or (for the last
/// split) the source's total duration. Validation covers the whole sequence
/// before any segment is built: starts must be non-decreasing, every segment
/// must have positive length, and boundaries past the source end are fatal
/// or collected as warnings depending on [`BoundaryPolicy`].
///
/// Zero declarations resolve to an empty plan without error.
pub fn resolve_plan(
    splits: &[RawSplit],
    source: &AudioDescriptor,
    options: &ResolveOptions,
) -> ResolveResult<SplitPlan> {
    let encoding = format::select(&source.source_codec, &options.requested_format);

    let starts = parse_starts(splits)?;
    check_start_order(&starts)?;

    let intervals = resolve_intervals(splits, &starts, source.total_duration_secs)?;
    let warnings = check_boundaries(&intervals, source.total_duration_secs, options.boundary_policy)?;

    let segments = materialize(splits, &intervals, &options.pattern);
    debug!(
        segments = segments.len(),
        encoder = %encoding.encoder,
        extension = %encoding.extension,
        "split plan resolved"
    );

    Ok(SplitPlan {
        segments,
        encoding,
        warnings,
    })
}

/// Parse every declared start timestamp.
fn parse_starts(splits: &[RawSplit]) -> ResolveResult<Vec<f64>> {
    splits
        .iter()
        .enumerate()
        .map(|(i, split)| parse_field(i, "start", &split.start))
        .collect()
}

/// Starts must be non-decreasing across the declaration order.
fn check_start_order(starts: &[f64]) -> ResolveResult<()> {
    for (i, pair) in starts.windows(2).enumerate() {
        if pair[1] < pair[0] {
            return Err(ResolveError::OutOfOrderStart {
                split: (i + 2) as u32,
                start_secs: pair[1],
                prev_start_secs: pair[0],
            });
        }
    }
    Ok(())
}

/// Resolve the `(start, end)` interval of every split.
fn resolve_intervals(
    splits: &[RawSplit],
    starts: &[f64],
    total_secs: f64,
) -> ResolveResult<Vec<(f64, f64)>> {
    let mut intervals = Vec::with_capacity(splits.len());

    for (i, split) in splits.iter().enumerate() {
        let start = starts[i];
        let end = if let Some(end_text) = &split.end {
            parse_field(i, "end", end_text)?
        } else if let Some(duration_text) = &split.duration {
            start + parse_field(i, "duration", duration_text)?
        } else if i + 1 < splits.len() {
            // Chain to the next declared start, not its resolved end.
            starts[i + 1]
        } else {
            total_secs
        };

        if end <= start {
            return Err(ResolveError::EmptySegment {
                split: (i + 1) as u32,
                start_secs: start,
                end_secs: end,
            });
        }

        intervals.push((start, end));
    }

    Ok(intervals)
}

/// Apply the boundary policy to intervals that reach past the source end.
fn check_boundaries(
    intervals: &[(f64, f64)],
    total_secs: f64,
    policy: BoundaryPolicy,
) -> ResolveResult<Vec<ResolveWarning>> {
    let mut warnings = Vec::new();

    for (i, &(start, end)) in intervals.iter().enumerate() {
        let boundary = if start > total_secs {
            start
        } else if end > total_secs {
            end
        } else {
            continue;
        };

        match policy {
            BoundaryPolicy::Strict => {
                return Err(ResolveError::DurationExceeded {
                    split: (i + 1) as u32,
                    boundary_secs: boundary,
                    total_secs,
                });
            }
            BoundaryPolicy::Lenient => {
                let warning = ResolveWarning::BoundaryPastEnd {
                    split: (i + 1) as u32,
                    boundary_secs: boundary,
                    total_secs,
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    Ok(warnings)
}

/// Build the final segments once validation has passed.
fn materialize(
    splits: &[RawSplit],
    intervals: &[(f64, f64)],
    pattern: &str,
) -> Vec<ResolvedSegment> {
    splits
        .iter()
        .zip(intervals)
        .enumerate()
        .map(|(i, (split, &(start_secs, end_secs)))| {
            let index = (i + 1) as u32;
            let meta = metadata::normalize(
                split
                    .metadata
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
            let output_filename = naming::segment_filename(pattern, index, &meta);
            ResolvedSegment {
                index,
                start_secs,
                end_secs,
                metadata: meta,
                output_filename,
            }
        })
        .collect()
}

fn parse_field(split: usize, field: &'static str, text: &str) -> ResolveResult<f64> {
    parse_timestamp(text).map_err(|source| ResolveError::InvalidTimestamp {
        split: (split + 1) as u32,
        field,
        source,
    })
}
