//! Textual timestamp parsing and formatting.
//!
//! Split declarations carry timestamps as text in one of three shapes:
//! `H+:MM:SS[.fff]`, `M+:SS[.fff]`, or bare `S+[.fff]`. Parsing resolves
//! them to seconds with millisecond precision or better; formatting is the
//! inverse and is used for log output and round-trip tests.

use thiserror::Error;

/// Errors that can occur while parsing a timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The text matches none of the accepted shapes.
    #[error("'{0}' is not a valid timestamp (expected HH:MM:SS, MM:SS or SS, with optional fraction)")]
    Malformed(String),

    /// A minutes or seconds component is 60 or more.
    #[error("'{0}' has an out-of-range minutes or seconds component")]
    ComponentOutOfRange(String),
}

/// Result type for timestamp operations.
pub type TimestampResult<T> = Result<T, TimestampError>;

/// Parse a timestamp string into seconds.
///
/// Accepts `H+:MM:SS`, `M+:SS` and `S+`, where the final component may carry
/// a fractional suffix (`.fff`). All components must be non-negative; when a
/// higher-order component is present, minutes and seconds must stay below 60.
///
/// ```
/// use split_core::timestamp::parse_timestamp;
///
/// assert_eq!(parse_timestamp("00:10:00").unwrap(), 600.0);
/// assert_eq!(parse_timestamp("1:30").unwrap(), 90.0);
/// assert_eq!(parse_timestamp("12.5").unwrap(), 12.5);
/// ```
pub fn parse_timestamp(text: &str) -> TimestampResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Malformed(text.to_string()));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() > 3 {
        return Err(TimestampError::Malformed(text.to_string()));
    }

    // All components except the last are whole numbers.
    let mut whole = [0u64; 2];
    for (i, part) in parts[..parts.len() - 1].iter().enumerate() {
        whole[i] = parse_whole(part).ok_or_else(|| TimestampError::Malformed(text.to_string()))?;
    }

    let (seconds, fraction) =
        parse_seconds(parts[parts.len() - 1]).ok_or_else(|| TimestampError::Malformed(text.to_string()))?;

    let total = match parts.len() {
        1 => seconds as f64 + fraction,
        2 => {
            if seconds >= 60 {
                return Err(TimestampError::ComponentOutOfRange(text.to_string()));
            }
            whole[0] as f64 * 60.0 + seconds as f64 + fraction
        }
        3 => {
            if whole[1] >= 60 || seconds >= 60 {
                return Err(TimestampError::ComponentOutOfRange(text.to_string()));
            }
            whole[0] as f64 * 3600.0 + whole[1] as f64 * 60.0 + seconds as f64 + fraction
        }
        _ => unreachable!(),
    };

    Ok(total)
}

/// Format seconds as `HH:MM:SS.mmm`.
///
/// The inverse of [`parse_timestamp`] at millisecond precision.
pub fn format_timestamp(secs: f64) -> String {
    let total_ms = (secs * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, ms)
}

/// Parse a non-negative whole-number component (no sign, no fraction).
fn parse_whole(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse the final component: whole seconds plus an optional fraction.
fn parse_seconds(part: &str) -> Option<(u64, f64)> {
    let (whole_str, frac_str) = match part.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (part, None),
    };

    let whole = parse_whole(whole_str)?;
    let fraction = match frac_str {
        Some(f) => {
            if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Truncate to microseconds; anything finer is noise for audio cuts.
            let digits = &f[..f.len().min(6)];
            digits.parse::<u64>().ok()? as f64 / 10f64.powi(digits.len() as i32)
        }
        None => 0.0,
    };

    Some((whole, fraction))
}
