//! Key-value slots the store persists into.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// A persistent key-value slot.
pub trait Storage {
    /// Read the text stored under `key`, or `None` if nothing was saved.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the text stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target and rename so a crash never leaves half a document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process storage. Can be told to fail, to exercise degraded persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    failing: bool,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(key.into(), value.into());
        storage
    }

    /// Make every subsequent read and write fail (or succeed again).
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Raw text of a slot.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("storage is switched off".into()));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_missing_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("absent").unwrap().is_none());
    }

    #[test]
    fn file_write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        storage.write("slot", "{\"a\":1}").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(storage.path_for("slot").exists());
        assert!(!storage.path_for("slot").with_extension("json.tmp").exists());
    }

    #[test]
    fn file_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.write("slot", "one").unwrap();
        storage.write("slot", "two").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn file_write_into_blocked_dir_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let mut storage = FileStorage::new(&blocker);
        assert!(matches!(storage.write("slot", "x"), Err(StorageError::Io(_))));
    }

    #[test]
    fn memory_failing_mode() {
        let mut storage = MemoryStorage::with_slot("k", "v");
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
        storage.set_failing(true);
        assert!(storage.read("k").is_err());
        assert!(storage.write("k", "w").is_err());
        storage.set_failing(false);
        assert_eq!(storage.get("k"), Some("v"));
    }
}
