//! The blob-store seam and the two bundled stores.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{PersistenceError, Result};

/// String key-value store the schema repository persists through.
///
/// This is the narrow waist between the engine and whatever actually holds
/// the bytes. `get` answers `None` for both "never written" and "unreadable";
/// the repository treats the two identically, so stores do not need to tell
/// them apart.
pub trait BlobStore {
    /// The stored string under `key`, if present and readable.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the stored string under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// In-memory store for tests and embedded single-process use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key under a base directory.
///
/// Writes go through a temp file and rename to prevent data corruption on
/// crash or power loss.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: base_dir.clone(),
            source: e,
        })?;
        Ok(Self { base_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(value.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("forms"), None);
        store.set("forms", "[]".to_string()).expect("set");
        assert_eq!(store.get("forms"), Some("[]".to_string()));
        store.set("forms", "[1]".to_string()).expect("overwrite");
        assert_eq!(store.get("forms"), Some("[1]".to_string()));
    }

    #[test]
    fn file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path()).expect("open store");
        store.set("forms", "[]".to_string()).expect("set");

        assert!(dir.path().join("forms.json").exists());
        // No temp file left behind after the rename.
        assert!(!dir.path().join("forms.json.tmp").exists());
        assert_eq!(store.get("forms"), Some("[]".to_string()));
    }

    #[test]
    fn file_store_reads_none_for_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path()).expect("open store");
        assert_eq!(store.get("absent"), None);
    }
}
