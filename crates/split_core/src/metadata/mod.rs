//! Metadata canonicalization.
//!
//! Split declarations may spell tag fields in several historical ways
//! (`date` vs `year`, `label` vs `publisher`, ...). This module folds
//! every accepted spelling onto one canonical key via a declarative alias
//! table, so no call site carries its own aliasing logic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One canonical tag field the engine understands.
///
/// Declaration order defines the canonical ordering of metadata records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalKey {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Year,
    Composer,
    Genre,
    Performer,
    Publisher,
    Comment,
    Copyright,
    Isrc,
    CatalogNumber,
    DiscNumber,
    TotalDiscs,
    TotalTracks,
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CanonicalKey {
    /// The canonical spelling of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalKey::Title => "title",
            CanonicalKey::Artist => "artist",
            CanonicalKey::Album => "album",
            CanonicalKey::AlbumArtist => "albumArtist",
            CanonicalKey::Year => "year",
            CanonicalKey::Composer => "composer",
            CanonicalKey::Genre => "genre",
            CanonicalKey::Performer => "performer",
            CanonicalKey::Publisher => "publisher",
            CanonicalKey::Comment => "comment",
            CanonicalKey::Copyright => "copyright",
            CanonicalKey::Isrc => "isrc",
            CanonicalKey::CatalogNumber => "catalogNumber",
            CanonicalKey::DiscNumber => "discNumber",
            CanonicalKey::TotalDiscs => "totalDiscs",
            CanonicalKey::TotalTracks => "totalTracks",
        }
    }
}

/// Accepted input spellings per canonical key, in priority order.
///
/// The first alias present in the input wins; later aliases for the same
/// key are ignored once a value is found.
const ALIAS_TABLE: &[(CanonicalKey, &[&str])] = &[
    (CanonicalKey::Title, &["title"]),
    (CanonicalKey::Artist, &["artist"]),
    (CanonicalKey::Album, &["album"]),
    (CanonicalKey::AlbumArtist, &["albumArtist", "album_artist"]),
    (CanonicalKey::Year, &["year", "date"]),
    (CanonicalKey::Composer, &["composer"]),
    (CanonicalKey::Genre, &["genre"]),
    (CanonicalKey::Performer, &["performer", "conductor"]),
    (CanonicalKey::Publisher, &["publisher", "label"]),
    (CanonicalKey::Comment, &["comment"]),
    (CanonicalKey::Copyright, &["copyright"]),
    (CanonicalKey::Isrc, &["isrc"]),
    (CanonicalKey::CatalogNumber, &["catalogNumber"]),
    (CanonicalKey::DiscNumber, &["discNumber", "disc_number"]),
    (CanonicalKey::TotalDiscs, &["totalDiscs"]),
    (CanonicalKey::TotalTracks, &["totalTracks"]),
];

/// Canonicalized metadata for one segment.
///
/// Keys are stored in canonical order; unset keys are absent, never
/// empty-string placeholders. An entirely empty record is valid and tells
/// the filename engine to fall back to sequential numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMetadata {
    values: BTreeMap<CanonicalKey, String>,
}

impl CanonicalMetadata {
    /// Create an empty metadata record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a canonical key, if set.
    pub fn get(&self, key: CanonicalKey) -> Option<&str> {
        self.values.get(&key).map(|v| v.as_str())
    }

    /// Set a value for a canonical key. Empty values are ignored.
    pub fn set(&mut self, key: CanonicalKey, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(key, value);
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: CanonicalKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over set fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Normalize a raw string-to-string metadata map into a canonical record.
///
/// Alias resolution is first-present-wins following the priority order of
/// the alias table. Unrecognized input keys are dropped (logged at debug
/// level so they stay observable). Empty and whitespace-only values count
/// as absent.
pub fn normalize<'a, I>(raw: I) -> CanonicalMetadata
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let raw: Vec<(&str, &str)> = raw.into_iter().collect();
    let mut canonical = CanonicalMetadata::new();

    for (key, aliases) in ALIAS_TABLE {
        for alias in *aliases {
            if let Some((_, value)) = raw.iter().find(|(k, _)| k == alias) {
                let value = value.trim();
                if !value.is_empty() {
                    canonical.set(*key, value);
                    break;
                }
            }
        }
    }

    for (key, _) in &raw {
        let known = ALIAS_TABLE
            .iter()
            .any(|(_, aliases)| aliases.iter().any(|a| a == key));
        if !known {
            debug!(key, "dropping unrecognized metadata key");
        }
    }

    canonical
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn normalize_map(pairs: &[(&str, &str)]) -> CanonicalMetadata {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        normalize(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    #[test]
    fn maps_direct_spellings() {
        let meta = normalize_map(&[("title", "Intro"), ("artist", "Someone")]);
        assert_eq!(meta.get(CanonicalKey::Title), Some("Intro"));
        assert_eq!(meta.get(CanonicalKey::Artist), Some("Someone"));
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn resolves_aliases() {
        let meta = normalize_map(&[
            ("date", "1969"),
            ("conductor", "Karajan"),
            ("label", "DG"),
            ("album_artist", "BPO"),
            ("disc_number", "2"),
        ]);
        assert_eq!(meta.get(CanonicalKey::Year), Some("1969"));
        assert_eq!(meta.get(CanonicalKey::Performer), Some("Karajan"));
        assert_eq!(meta.get(CanonicalKey::Publisher), Some("DG"));
        assert_eq!(meta.get(CanonicalKey::AlbumArtist), Some("BPO"));
        assert_eq!(meta.get(CanonicalKey::DiscNumber), Some("2"));
    }

    #[test]
    fn first_present_alias_wins() {
        let meta = normalize_map(&[("date", "1968"), ("year", "1969")]);
        // "year" is first in the alias list, so it wins even though "date"
        // is also present.
        assert_eq!(meta.get(CanonicalKey::Year), Some("1969"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn drops_unknown_keys_silently() {
        let meta = normalize_map(&[("mood", "mellow"), ("title", "Song")]);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get(CanonicalKey::Title), Some("Song"));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let meta = normalize_map(&[("title", ""), ("artist", "   ")]);
        assert!(meta.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_record() {
        let meta = normalize_map(&[]);
        assert!(meta.is_empty());
    }

    #[test]
    fn iterates_in_canonical_order() {
        let meta = normalize_map(&[("year", "1969"), ("title", "A"), ("genre", "Rock")]);
        let keys: Vec<CanonicalKey> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![CanonicalKey::Title, CanonicalKey::Year, CanonicalKey::Genre]
        );
    }
}
