//! Host settings persisted next to the store

use crate::io::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CEILING_MB: f64 = 20.0;

/// User-facing settings. The ceiling is stored as given and clamped by the
/// store when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_ceiling_mb")]
    pub ceiling_mb: f64,
}

fn default_ceiling_mb() -> f64 {
    DEFAULT_CEILING_MB
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ceiling_mb: DEFAULT_CEILING_MB,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is absent or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "malformed settings, using defaults"
                );
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable settings, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_missing_file_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_save_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        Settings { ceiling_mb: 42.0 }.save(&path).unwrap();
        assert_eq!(Settings::load(&path).ceiling_mb, 42.0);
    }

    #[test]
    fn test_settings_malformed_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"ceiling_mb": "lots"}"#).unwrap();
        assert_eq!(Settings::load(&path).ceiling_mb, DEFAULT_CEILING_MB);

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Settings::load(&path).ceiling_mb, DEFAULT_CEILING_MB);
    }
}
