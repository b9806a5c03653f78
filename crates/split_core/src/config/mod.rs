//! Configuration management for the splitting engine.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Defaults for missing sections and fields on load
//!
//! # Example
//!
//! ```no_run
//! use split_core::config::ConfigManager;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/splitter.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Naming pattern: {}", config.settings().naming.pattern);
//!
//! // Modify and save
//! config.settings_mut().output.format = "flac".to_string();
//! config.save().unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{NamingSettings, OutputSettings, Settings, SplittingSettings};
