//! Output filename derivation.
//!
//! Filenames come from a user pattern containing two-character `%x` tokens
//! (`%n` track index, `%t` title, ...). Expansion runs as a single-pass
//! scanner so a substituted value can never be re-interpreted as another
//! token, then the result is cleaned up for filesystem safety.

use crate::metadata::{CanonicalKey, CanonicalMetadata};

/// Characters that never survive into a filename.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Expand a naming pattern against one segment's index and metadata.
///
/// Token table:
///
/// | Token | Source            | Token | Source        |
/// |-------|-------------------|-------|---------------|
/// | `%n`  | track index       | `%t`  | title (falls back to `Track {index}`) |
/// | `%a`  | artist            | `%A`  | album artist  |
/// | `%b`  | album             | `%y`  | year          |
/// | `%C`  | composer          | `%g`  | genre         |
/// | `%p`  | performer         | `%l`  | publisher     |
/// | `%d`  | disc number       | `%D`  | total discs   |
/// | `%N`  | total tracks      | `%c`  | comment       |
/// | `%%`  | literal `%`       |       |               |
///
/// Unrecognized tokens and unset fields expand to the empty string; a
/// trailing lone `%` is kept literally.
pub fn expand_pattern(pattern: &str, index: u32, metadata: &CanonicalMetadata) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('n') => out.push_str(&index.to_string()),
            Some('t') => match metadata.get(CanonicalKey::Title) {
                Some(title) => out.push_str(title),
                None => out.push_str(&format!("Track {}", index)),
            },
            Some(token) => {
                if let Some(key) = token_key(token) {
                    if let Some(value) = metadata.get(key) {
                        out.push_str(value);
                    }
                }
                // Unknown token or unset field: expand to nothing.
            }
            None => out.push('%'),
        }
    }

    out
}

/// Make a filename filesystem-safe.
///
/// Collapses whitespace runs to a single space, trims the ends, then
/// replaces every reserved character with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

/// Derive the output filename (without extension) for one segment.
///
/// When the title field is absent the pattern is skipped entirely and the
/// bare decimal index is used; this is the documented minimal-metadata
/// behavior.
pub fn segment_filename(pattern: &str, index: u32, metadata: &CanonicalMetadata) -> String {
    if metadata.get(CanonicalKey::Title).is_none() {
        return index.to_string();
    }
    sanitize_filename(&expand_pattern(pattern, index, metadata))
}

fn token_key(token: char) -> Option<CanonicalKey> {
    match token {
        't' => Some(CanonicalKey::Title),
        'a' => Some(CanonicalKey::Artist),
        'A' => Some(CanonicalKey::AlbumArtist),
        'b' => Some(CanonicalKey::Album),
        'y' => Some(CanonicalKey::Year),
        'C' => Some(CanonicalKey::Composer),
        'g' => Some(CanonicalKey::Genre),
        'p' => Some(CanonicalKey::Performer),
        'l' => Some(CanonicalKey::Publisher),
        'd' => Some(CanonicalKey::DiscNumber),
        'D' => Some(CanonicalKey::TotalDiscs),
        'N' => Some(CanonicalKey::TotalTracks),
        'c' => Some(CanonicalKey::Comment),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(CanonicalKey, &str)]) -> CanonicalMetadata {
        let mut m = CanonicalMetadata::new();
        for (k, v) in pairs {
            m.set(*k, *v);
        }
        m
    }

    #[test]
    fn expands_index_and_title_default() {
        let result = expand_pattern("%n - %t", 3, &CanonicalMetadata::new());
        assert_eq!(result, "3 - Track 3");
        // No reserved characters: sanitization leaves it unchanged.
        assert_eq!(sanitize_filename(&result), "3 - Track 3");
    }

    #[test]
    fn expands_metadata_tokens() {
        let m = meta(&[
            (CanonicalKey::Title, "So What"),
            (CanonicalKey::Artist, "Miles Davis"),
            (CanonicalKey::Album, "Kind of Blue"),
            (CanonicalKey::Year, "1959"),
        ]);
        assert_eq!(
            expand_pattern("%a - %b (%y) - %n %t", 1, &m),
            "Miles Davis - Kind of Blue (1959) - 1 So What"
        );
    }

    #[test]
    fn literal_percent_is_not_resubstituted() {
        let m = meta(&[(CanonicalKey::Title, "x")]);
        assert_eq!(expand_pattern("Live/Take%%1", 1, &m), "Live/Take%1");
        assert_eq!(
            segment_filename("Live/Take%%1", 1, &m),
            "Live_Take%1"
        );
    }

    #[test]
    fn unknown_tokens_expand_to_empty() {
        assert_eq!(
            expand_pattern("%z%t", 2, &CanonicalMetadata::new()),
            "Track 2"
        );
    }

    #[test]
    fn unset_fields_expand_to_empty() {
        let m = meta(&[(CanonicalKey::Title, "Song")]);
        assert_eq!(expand_pattern("%a%t", 1, &m), "Song");
    }

    #[test]
    fn trailing_percent_is_literal() {
        assert_eq!(expand_pattern("50%", 1, &meta(&[(CanonicalKey::Title, "x")])), "50%");
    }

    #[test]
    fn substituted_value_with_token_text_stays_literal() {
        // A title containing "%a" must not trigger a second substitution.
        let m = meta(&[
            (CanonicalKey::Title, "100%a day"),
            (CanonicalKey::Artist, "Nobody"),
        ]);
        assert_eq!(expand_pattern("%t", 1, &m), "100%a day");
    }

    #[test]
    fn sanitize_collapses_whitespace_and_replaces_reserved() {
        assert_eq!(sanitize_filename("  a   b  "), "a b");
        assert_eq!(sanitize_filename("AC/DC: Vol* 1?"), "AC_DC_ Vol_ 1_");
        assert_eq!(sanitize_filename("a\\b\"c<d>e|f"), "a_b_c_d_e_f");
    }

    #[test]
    fn missing_title_falls_back_to_bare_index() {
        let m = meta(&[(CanonicalKey::Artist, "Someone")]);
        assert_eq!(segment_filename("%a - %t", 7, &m), "7");
        assert_eq!(segment_filename("%n - %t", 12, &CanonicalMetadata::new()), "12");
    }
}
