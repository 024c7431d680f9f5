//! # Configuration Module
//!
//! Runtime settings for the recommendation service. Today that is the
//! reference user every new submission is measured against with a musical
//! path.
//!
//! ## Sources
//!
//! Later sources win:
//! 1. Built-in defaults (reference user `Juan`)
//! 2. A JSON file, either given explicitly or found in the platform config
//!    directory:
//!    - Linux: `~/.config/muse-graph/config.json`
//!    - macOS: `~/Library/Application Support/muse-graph/config.json`
//!    - Windows: `%APPDATA%\muse-graph\config.json`
//! 3. Command-line / environment overrides
//!
//! ```json
//! { "reference_user": "Marianna" }
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Reference user when nothing else is configured.
pub const DEFAULT_REFERENCE_USER: &str = "Juan";

/// Returns the platform-appropriate config file path.
///
/// The file does not have to exist.
///
/// # Errors
///
/// Fails if the system config directory cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Please ensure your platform supports standard config directories."
        )
    })?;

    Ok(config_dir.join("muse-graph").join("config.json"))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Existing user every new user gets a musical path to
    pub reference_user: String,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            reference_user: DEFAULT_REFERENCE_USER.to_string(),
        }
    }
}

impl RecommenderConfig {
    /// Create configuration with an explicit reference user
    #[must_use]
    pub fn with_reference_user(reference_user: impl Into<String>) -> Self {
        Self {
            reference_user: reference_user.into(),
        }
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file at {}", path.display()))
    }

    /// Loads the configuration from `explicit`, or from the default location
    /// when that file exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` is given but unreadable, or if any file found is
    /// malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match get_config_path() {
            Ok(path) if path.is_file() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the reference user when `reference_user` is set.
    #[must_use]
    pub fn override_reference(mut self, reference_user: Option<String>) -> Self {
        if let Some(reference_user) = reference_user {
            self.reference_user = reference_user;
        }
        self
    }
}
