//! Setup preset loading.
//!
//! Presets are read from a TOML file and fall back to the presets built into
//! `chess-rules`.

use chess_rules::{builtin_preset, Preset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading presets.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the presets file from disk.
    #[error("Failed to read presets file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the presets file as valid TOML.
    #[error("Failed to parse presets: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Requested preset is neither in the file nor built in.
    #[error("Preset not found: {0}")]
    PresetNotFound(String),
}

/// Preset collection loaded from `presets.toml`.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PlayConfig {
    /// Map of preset names to their directives.
    #[serde(default)]
    pub presets: HashMap<String, Preset>,
}

impl PlayConfig {
    /// Returns the default presets file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("presets.toml")
    }

    /// Loads presets from `path`.
    ///
    /// A missing file yields an empty configuration, so only built-in presets
    /// are available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!("No presets file at {:?}, using built-in presets", path);
            Ok(Self::default())
        }
    }

    /// Looks up a preset by name; presets from the file shadow built-in ones.
    pub fn preset(&self, name: &str) -> Result<Preset, ConfigError> {
        self.presets
            .get(name)
            .cloned()
            .or_else(|| builtin_preset(name))
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// Names of every available preset, sorted.
    pub fn preset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.presets.keys().cloned().collect();
        for builtin in chess_rules::BUILTIN_PRESETS {
            if !self.presets.contains_key(builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        names
    }
}
