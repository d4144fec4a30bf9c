//! Application settings management
//!
//! User preferences read from `settings.json` in the config directory.

use crate::config::lookup::DEFAULT_SERVER;
use crate::config::storage::SETTINGS_FILE;
use crate::data::storage;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the day-of-year history service
    #[serde(default = "default_lookup_server")]
    pub lookup_server: String,

    /// Directory holding the favorites entry (defaults to the config directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_lookup_server() -> String {
    DEFAULT_SERVER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            lookup_server: default_lookup_server(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from default storage location
    pub fn load() -> Result<Self> {
        let path = storage::data_path(SETTINGS_FILE)?;
        Self::load_from(&path)
    }

    /// Load settings from a specific path; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match storage::load_from::<Settings>(path)? {
            Some(settings) => Ok(settings),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Directory the favorites store should live in
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => storage::config_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.lookup_server, "https://history.muffinlabs.com");
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::new();
        settings.lookup_server = "http://localhost:8080".to_string();
        settings.data_dir = Some(dir.path().join("favorites"));
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("missing.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"data_dir": "/tmp/historia"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.lookup_server, DEFAULT_SERVER);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/historia")));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "lookup_server = 1").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_resolved_data_dir_prefers_explicit() {
        let mut settings = Settings::new();
        settings.data_dir = Some(PathBuf::from("/srv/historia"));
        assert_eq!(
            settings.resolved_data_dir().unwrap(),
            PathBuf::from("/srv/historia")
        );
    }
}
