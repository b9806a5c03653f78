//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Missing sections and fields fall back to defaults on load.

use serde::{Deserialize, Serialize};

use crate::models::BoundaryPolicy;
use crate::resolver::ResolveOptions;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Split resolution settings.
    #[serde(default)]
    pub splitting: SplittingSettings,

    /// Output filename settings.
    #[serde(default)]
    pub naming: NamingSettings,

    /// Output format settings.
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Build resolver options from the configured values.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            boundary_policy: self.splitting.boundary_policy,
            pattern: self.naming.pattern.clone(),
            requested_format: self.output.format.clone(),
        }
    }
}

/// Split resolution configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplittingSettings {
    /// Policy for boundaries past the end of the source.
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
}

/// Output filename configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Naming pattern with `%x` tokens.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    "%n - %t".to_string()
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

/// Output format configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Requested output format ("auto" or a concrete format name).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "auto".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_auto() {
        let settings = Settings::default();
        assert_eq!(settings.splitting.boundary_policy, BoundaryPolicy::Lenient);
        assert_eq!(settings.naming.pattern, "%n - %t");
        assert_eq!(settings.output.format, "auto");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("[splitting]\nboundary_policy = \"strict\"\n").unwrap();
        assert_eq!(settings.splitting.boundary_policy, BoundaryPolicy::Strict);
        assert_eq!(settings.naming.pattern, "%n - %t");
    }

    #[test]
    fn resolve_options_mirror_settings() {
        let mut settings = Settings::default();
        settings.splitting.boundary_policy = BoundaryPolicy::Strict;
        settings.output.format = "mp3".to_string();
        let options = settings.resolve_options();
        assert_eq!(options.boundary_policy, BoundaryPolicy::Strict);
        assert_eq!(options.requested_format, "mp3");
        assert_eq!(options.pattern, "%n - %t");
    }
}
