//! Path resolution for the heartbeat store and settings

use std::path::PathBuf;

/// Environment variable that overrides the data directory
pub const HOME_ENV: &str = "FOCCUS_HOME";

/// Resolves standard paths for foccus data files
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    /// Resolve the data directory: `$FOCCUS_HOME`, else `~/.foccus`
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(dir));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".foccus")))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the SQLite heartbeat store path
    pub fn store_file(&self) -> PathBuf {
        self.root.join("foccus.db")
    }

    /// Get settings.json path
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    /// Create the data directory if missing
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_paths_default_root() {
        std::env::remove_var(HOME_ENV);
        let paths = Paths::new().unwrap();
        assert!(paths.root.ends_with(".foccus"));
    }

    #[test]
    #[serial]
    fn test_paths_env_override() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var(HOME_ENV, temp.path());
        let paths = Paths::new().unwrap();
        std::env::remove_var(HOME_ENV);

        assert_eq!(paths.root, temp.path());
    }

    #[test]
    fn test_store_and_settings_files() {
        let paths = Paths::with_root("/tmp/foccus-test");
        assert!(paths.store_file().ends_with("foccus-test/foccus.db"));
        assert!(paths.settings_file().ends_with("settings.json"));
    }

    #[test]
    fn test_ensure_root_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path().join("a").join("b"));
        paths.ensure_root().unwrap();
        assert!(paths.root.is_dir());
    }
}
