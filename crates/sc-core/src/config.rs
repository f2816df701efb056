//! Configuration for opening a store.

use std::path::PathBuf;

use crate::merge::STORAGE_KEY;

/// Directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".story-crystal";

/// Where and under which key the campaign is persisted.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the storage files.
    pub data_dir: PathBuf,
    /// Storage key of the campaign document.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the storage key. A blank key keeps the current one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.key = key;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.data_dir, PathBuf::from(".story-crystal"));
        assert_eq!(cfg.key, "story-crystal-data-v1");
    }

    #[test]
    fn builder_methods() {
        let cfg = StoreConfig::default()
            .with_data_dir("/tmp/isles")
            .with_key("isles");
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/isles"));
        assert_eq!(cfg.key, "isles");
    }

    #[test]
    fn blank_key_ignored() {
        let cfg = StoreConfig::default().with_key("  ");
        assert_eq!(cfg.key, STORAGE_KEY);
    }
}
