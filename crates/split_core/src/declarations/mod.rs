//! Raw split declarations from JSON documents and command-line entries.
//!
//! Both input paths converge on the same [`RawSplit`] shape before the
//! resolver sees them. The JSON path reads a `{"splits": [...]}` document;
//! the command-line path folds an ordered stream of field-assignment events
//! into records, where each new start opens a new record.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::RawSplit;

/// Errors that can occur while reading split declarations.
#[derive(Error, Debug)]
pub enum DeclarationsError {
    /// Failed to read the declarations file.
    #[error("failed to read declarations file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no `splits` array.
    #[error("declarations document has no 'splits' array")]
    MissingSplits,

    /// A split entry is malformed.
    #[error("split {index}: {message}")]
    InvalidSplit { index: usize, message: String },

    /// A field was assigned before any split was started.
    #[error("'{field}' assigned before any split start")]
    FieldBeforeStart { field: String },

    /// A field was assigned twice within one split.
    #[error("split {index}: duplicate '{field}'")]
    DuplicateField { index: usize, field: String },
}

/// Result type for declarations parsing.
pub type DeclarationsResult<T> = Result<T, DeclarationsError>;

/// Read raw splits from a JSON declarations file.
pub fn from_json_file(path: &Path) -> DeclarationsResult<Vec<RawSplit>> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Parse raw splits from a JSON declarations document.
///
/// The document is an object with a `splits` array. Each entry must carry a
/// string `start`; `end` and `duration` are optional. Every other field with
/// a string, number, or boolean value goes into the raw metadata map as-is
/// (spelling untouched); null and structured values are skipped.
pub fn from_json_str(json: &str) -> DeclarationsResult<Vec<RawSplit>> {
    let doc: Value = serde_json::from_str(json)?;

    let entries = doc
        .get("splits")
        .and_then(Value::as_array)
        .ok_or(DeclarationsError::MissingSplits)?;

    let mut splits = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        splits.push(parse_entry(index, entry)?);
    }

    debug!(count = splits.len(), "parsed split declarations");
    Ok(splits)
}

fn parse_entry(index: usize, entry: &Value) -> DeclarationsResult<RawSplit> {
    let obj = entry.as_object().ok_or_else(|| DeclarationsError::InvalidSplit {
        index,
        message: "entry is not an object".to_string(),
    })?;

    let start = obj
        .get("start")
        .and_then(Value::as_str)
        .ok_or_else(|| DeclarationsError::InvalidSplit {
            index,
            message: "missing or non-string 'start'".to_string(),
        })?;

    let mut split = RawSplit::new(start);
    for (key, value) in obj {
        match key.as_str() {
            "start" => {}
            "end" | "duration" => {
                let text = value.as_str().ok_or_else(|| DeclarationsError::InvalidSplit {
                    index,
                    message: format!("non-string '{}'", key),
                })?;
                if key == "end" {
                    split.end = Some(text.to_string());
                } else {
                    split.duration = Some(text.to_string());
                }
            }
            _ => {
                if let Some(text) = scalar_to_string(value) {
                    split.metadata.insert(key.clone(), text);
                }
            }
        }
    }

    Ok(split)
}

/// Convert a scalar JSON value to its string form; structured values are
/// dropped.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One field assignment accumulated from the command line, in flag order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitEvent {
    /// Opens a new split at the given start timestamp.
    Start(String),
    /// Sets the current split's end timestamp.
    End(String),
    /// Sets the current split's duration.
    Duration(String),
    /// Adds a raw metadata field to the current split.
    Tag { key: String, value: String },
}

/// Fold an ordered stream of field assignments into immutable splits.
///
/// Each [`SplitEvent::Start`] opens a new record; every other event applies
/// to the record most recently opened. Assignments before the first start
/// and duplicate `end`/`duration`/tag assignments within one record are
/// errors rather than silent overwrites.
pub fn fold_events<I>(events: I) -> DeclarationsResult<Vec<RawSplit>>
where
    I: IntoIterator<Item = SplitEvent>,
{
    let mut splits: Vec<RawSplit> = Vec::new();

    for event in events {
        match event {
            SplitEvent::Start(start) => splits.push(RawSplit::new(start)),
            SplitEvent::End(end) => {
                let (index, current) = current_split(&mut splits, "end")?;
                if current.end.is_some() {
                    return Err(DeclarationsError::DuplicateField {
                        index,
                        field: "end".to_string(),
                    });
                }
                current.end = Some(end);
            }
            SplitEvent::Duration(duration) => {
                let (index, current) = current_split(&mut splits, "duration")?;
                if current.duration.is_some() {
                    return Err(DeclarationsError::DuplicateField {
                        index,
                        field: "duration".to_string(),
                    });
                }
                current.duration = Some(duration);
            }
            SplitEvent::Tag { key, value } => {
                let (index, current) = current_split(&mut splits, &key)?;
                if current.metadata.contains_key(&key) {
                    return Err(DeclarationsError::DuplicateField { index, field: key });
                }
                current.metadata.insert(key, value);
            }
        }
    }

    Ok(splits)
}

fn current_split<'a>(
    splits: &'a mut Vec<RawSplit>,
    field: &str,
) -> DeclarationsResult<(usize, &'a mut RawSplit)> {
    let index = splits.len().checked_sub(1).ok_or_else(|| {
        DeclarationsError::FieldBeforeStart {
            field: field.to_string(),
        }
    })?;
    Ok((index, &mut splits[index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declarations_document() {
        let json = r#"{
            "splits": [
                {"start": "00:00:00", "end": "00:04:30", "title": "Intro", "year": 1969},
                {"start": "00:04:30", "duration": "00:03:00", "title": "Second"},
                {"start": "00:07:30"}
            ]
        }"#;
        let splits = from_json_str(json).unwrap();
        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0].end.as_deref(), Some("00:04:30"));
        assert_eq!(splits[0].metadata.get("title").map(String::as_str), Some("Intro"));
        assert_eq!(splits[0].metadata.get("year").map(String::as_str), Some("1969"));
        assert_eq!(splits[1].duration.as_deref(), Some("00:03:00"));
        assert!(splits[2].end.is_none() && splits[2].duration.is_none());
    }

    #[test]
    fn missing_splits_array_is_an_error() {
        assert!(matches!(
            from_json_str(r#"{"tracks": []}"#),
            Err(DeclarationsError::MissingSplits)
        ));
        assert!(matches!(
            from_json_str(r#"{"splits": "yes"}"#),
            Err(DeclarationsError::MissingSplits)
        ));
    }

    #[test]
    fn entry_without_start_is_an_error() {
        let err = from_json_str(r#"{"splits": [{"title": "x"}]}"#).unwrap_err();
        assert!(matches!(err, DeclarationsError::InvalidSplit { index: 0, .. }));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            from_json_str("{not json"),
            Err(DeclarationsError::Json(_))
        ));
    }

    #[test]
    fn structured_metadata_values_are_skipped() {
        let json = r#"{"splits": [{"start": "0", "title": "x", "extra": {"a": 1}}]}"#;
        let splits = from_json_str(json).unwrap();
        assert!(!splits[0].metadata.contains_key("extra"));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splits.json");
        std::fs::write(&path, r#"{"splits": [{"start": "0"}]}"#).unwrap();
        let splits = from_json_file(&path).unwrap();
        assert_eq!(splits.len(), 1);
    }

    #[test]
    fn folds_events_into_records() {
        let events = vec![
            SplitEvent::Start("00:00:00".to_string()),
            SplitEvent::Tag {
                key: "title".to_string(),
                value: "Intro".to_string(),
            },
            SplitEvent::Start("00:04:00".to_string()),
            SplitEvent::Duration("00:02:00".to_string()),
        ];
        let splits = fold_events(events).unwrap();
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].metadata.get("title").map(String::as_str), Some("Intro"));
        assert_eq!(splits[1].duration.as_deref(), Some("00:02:00"));
    }

    #[test]
    fn field_before_first_start_is_an_error() {
        let err = fold_events(vec![SplitEvent::End("1:00".to_string())]).unwrap_err();
        assert!(matches!(err, DeclarationsError::FieldBeforeStart { .. }));
    }

    #[test]
    fn duplicate_field_in_one_record_is_an_error() {
        let events = vec![
            SplitEvent::Start("0".to_string()),
            SplitEvent::End("10".to_string()),
            SplitEvent::End("20".to_string()),
        ];
        let err = fold_events(events).unwrap_err();
        assert!(matches!(
            err,
            DeclarationsError::DuplicateField { index: 0, .. }
        ));
    }

    #[test]
    fn no_events_fold_to_no_splits() {
        assert!(fold_events(Vec::new()).unwrap().is_empty());
    }
}
