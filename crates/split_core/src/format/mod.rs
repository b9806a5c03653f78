//! Output encoder and extension selection.
//!
//! Maps the source codec plus the requested output format onto a concrete
//! encoder identity, file extension, and quality policy for the transcoding
//! frontend. Selection is permissive: an unknown requested format becomes a
//! stream copy, never an error.

use serde::{Deserialize, Serialize};

/// Fixed lossless target used when `auto` meets a lossless source.
const LOSSLESS_TARGET: &str = "flac";

/// Source codecs considered lossless for `auto` selection.
const LOSSLESS_CODECS: &[&str] = &["flac", "wav", "alac", "ape", "wv", "wavpack", "aiff", "tta"];

/// Quality policy attached to a selected encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPolicy {
    /// No re-encoding; the stream is copied bit-for-bit.
    StreamCopy,
    /// Lossless encoding at the encoder's default compression.
    Lossless,
    /// Constant bitrate in kbit/s.
    ConstantBitrate(u32),
    /// Encoder-native variable-bitrate quality level.
    VariableQuality(u8),
}

impl std::fmt::Display for QualityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityPolicy::StreamCopy => write!(f, "copy"),
            QualityPolicy::Lossless => write!(f, "lossless"),
            QualityPolicy::ConstantBitrate(kbps) => write!(f, "{}k", kbps),
            QualityPolicy::VariableQuality(q) => write!(f, "q{}", q),
        }
    }
}

/// A fully selected output encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    /// Encoder identity for the transcoding frontend (e.g. "flac",
    /// "libmp3lame", or "copy" for pass-through).
    pub encoder: String,
    /// Output file extension, without the dot.
    pub extension: String,
    /// Bitrate/quality policy for the encoder.
    pub quality: QualityPolicy,
}

impl Encoding {
    fn new(encoder: &str, extension: &str, quality: QualityPolicy) -> Self {
        Self {
            encoder: encoder.to_string(),
            extension: extension.to_string(),
            quality,
        }
    }

    /// Stream-copy encoding with the given extension.
    fn copy(extension: &str) -> Self {
        Self::new("copy", extension, QualityPolicy::StreamCopy)
    }
}

/// Whether a source codec identifier names a lossless codec.
pub fn is_lossless(codec: &str) -> bool {
    LOSSLESS_CODECS.contains(&codec) || codec.starts_with("pcm_")
}

/// Select the output encoding for a source codec and requested format.
///
/// `"auto"` forces lossless sources to the fixed lossless target and passes
/// lossy sources through unchanged (stream copy). A concrete request is
/// honored unconditionally; a request this table does not know becomes a
/// stream copy with the literal request as the extension.
pub fn select(source_codec: &str, requested: &str) -> Encoding {
    match requested {
        "auto" => {
            if is_lossless(source_codec) {
                Encoding::new(LOSSLESS_TARGET, LOSSLESS_TARGET, QualityPolicy::Lossless)
            } else {
                Encoding::copy(source_codec)
            }
        }
        "flac" => Encoding::new("flac", "flac", QualityPolicy::Lossless),
        "wav" => Encoding::new("pcm_s16le", "wav", QualityPolicy::Lossless),
        "alac" => Encoding::new("alac", "m4a", QualityPolicy::Lossless),
        "mp3" => Encoding::new("libmp3lame", "mp3", QualityPolicy::ConstantBitrate(320)),
        "ogg" | "vorbis" => Encoding::new("libvorbis", "ogg", QualityPolicy::VariableQuality(8)),
        "opus" => Encoding::new("libopus", "opus", QualityPolicy::ConstantBitrate(192)),
        "aac" | "m4a" => Encoding::new("aac", "m4a", QualityPolicy::ConstantBitrate(256)),
        other => Encoding::copy(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_forces_lossless_sources_to_flac() {
        for codec in ["wav", "flac", "alac", "ape", "pcm_s24le"] {
            let enc = select(codec, "auto");
            assert_eq!(enc.encoder, "flac", "source {codec}");
            assert_eq!(enc.extension, "flac");
            assert_eq!(enc.quality, QualityPolicy::Lossless);
        }
    }

    #[test]
    fn auto_passes_lossy_sources_through() {
        let enc = select("mp3", "auto");
        assert_eq!(enc.encoder, "copy");
        assert_eq!(enc.extension, "mp3");
        assert_eq!(enc.quality, QualityPolicy::StreamCopy);
    }

    #[test]
    fn concrete_request_overrides_source() {
        let enc = select("flac", "mp3");
        assert_eq!(enc.encoder, "libmp3lame");
        assert_eq!(enc.extension, "mp3");
        assert_eq!(enc.quality, QualityPolicy::ConstantBitrate(320));

        let enc = select("mp3", "flac");
        assert_eq!(enc.encoder, "flac");
        assert_eq!(enc.quality, QualityPolicy::Lossless);
    }

    #[test]
    fn vorbis_and_ogg_are_the_same_target() {
        assert_eq!(select("flac", "ogg"), select("flac", "vorbis"));
    }

    #[test]
    fn unknown_request_is_permissive_copy() {
        let enc = select("flac", "shorten");
        assert_eq!(enc.encoder, "copy");
        assert_eq!(enc.extension, "shorten");
        assert_eq!(enc.quality, QualityPolicy::StreamCopy);
    }
}
