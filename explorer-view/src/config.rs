//! Explorer configuration, read from a TOML file.
//!
//! ```toml
//! [permissions]
//! create-tokens = ["create:datasources"]
//! manage-tokens = ["manage:datasources"]
//!
//! [storage]
//! path = "~/.local/state/explorer/state.db"
//! ```

use explorer_permissions::PermissionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Where expansion state is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// SQLite file; `None` keeps state in memory only. A leading `~` is
    /// expanded by [`StorageConfig::resolved_path`].
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path with a leading `~` replaced by the home directory.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => {
            warn!("No home directory found, using {:?} as given", path);
            path.to_path_buf()
        }
    }
}

/// Top-level explorer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExplorerConfig {
    #[serde(default)]
    pub permissions: PermissionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ExplorerConfig {
    /// Parses configuration, failing on malformed input.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a file, failing on IO or parse errors.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning when the file is unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No explorer config found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded explorer config from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load explorer config {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_types::PermissionToken;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ExplorerConfig::from_toml_str("").unwrap(), ExplorerConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            [permissions]
            create-tokens = ["ds:new"]
            manage-tokens = ["ds:admin", "ds:owner"]

            [storage]
            path = "/tmp/explorer.db"
            "#,
        )
        .unwrap();
        assert!(config.permissions.create_tokens.contains(&PermissionToken::new("ds:new")));
        assert_eq!(config.permissions.manage_tokens.len(), 2);
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/explorer.db")));
    }

    #[test]
    fn home_relative_storage_path_is_expanded() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("~/.local/state/explorer/state.db")),
        };
        let home = dirs::home_dir().expect("home directory");
        assert_eq!(
            storage.resolved_path(),
            Some(home.join(".local/state/explorer/state.db"))
        );
    }

    #[test]
    fn absolute_storage_path_is_kept() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("/var/lib/explorer.db")),
        };
        assert_eq!(storage.resolved_path(), Some(PathBuf::from("/var/lib/explorer.db")));
        assert_eq!(StorageConfig::default().resolved_path(), None);
    }

    #[test]
    fn malformed_document_errors() {
        assert!(ExplorerConfig::from_toml_str("[permissions\ncreate-tokens = 1").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExplorerConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn load_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "storage = 42").unwrap();

        assert_eq!(ExplorerConfig::load_from(&path), ExplorerConfig::default());
        assert!(ExplorerConfig::try_load_from(&path).is_err());
    }
}
