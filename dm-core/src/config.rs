//! Where campaign data lives.

use crate::persist::EntityKind;
use std::path::PathBuf;

/// Environment variable naming the campaign data directory.
pub const DATA_DIR_ENV: &str = "DM_ASSIST_DATA_DIR";

/// Storage configuration: one JSON file per entity kind inside `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Read the data directory from `DM_ASSIST_DATA_DIR`, falling back to
    /// the working directory.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// Path of the file holding every entity of `kind`.
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let config = StorageConfig::new("/campaign");
        assert_eq!(
            config.path_for(EntityKind::Character),
            PathBuf::from("/campaign/characters.json")
        );
        assert_eq!(
            config.path_for(EntityKind::Shopkeep),
            PathBuf::from("/campaign/shopkeeps.json")
        );
    }

    #[test]
    fn test_default_is_working_directory() {
        assert_eq!(StorageConfig::default().data_dir, PathBuf::from("."));
    }
}
