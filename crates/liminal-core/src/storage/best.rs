//! Key-value persistence for the personal-best streak.
//!
//! The stats engine never touches storage directly; it is handed a
//! [`PersonalBestStore`] by the caller.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Key under which the best streak is stored.
pub const PERSONAL_BEST_KEY: &str = "liminal-streak-best";

/// Minimal string key-value store.
pub trait PersonalBestStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: PersonalBestStore + ?Sized> PersonalBestStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryBestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PersonalBestStore for MemoryBestStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Store backed by a JSON object file, e.g. `{"liminal-streak-best": "7"}`.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct FileBestStore {
    path: PathBuf,
}

impl FileBestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/state.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(super::data_dir()?.join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl PersonalBestStore for FileBestStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryBestStore::new();
        assert_eq!(store.get(PERSONAL_BEST_KEY).unwrap(), None);
        store.set(PERSONAL_BEST_KEY, "4").unwrap();
        assert_eq!(store.get(PERSONAL_BEST_KEY).unwrap().as_deref(), Some("4"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBestStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get(PERSONAL_BEST_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut store = FileBestStore::new(&path);
        store.set("other", "x").unwrap();
        store.set(PERSONAL_BEST_KEY, "9").unwrap();

        let reopened = FileBestStore::new(&path);
        assert_eq!(reopened.get(PERSONAL_BEST_KEY).unwrap().as_deref(), Some("9"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileBestStore::new(&path);
        assert!(matches!(
            store.get(PERSONAL_BEST_KEY),
            Err(CoreError::Store(StoreError::Corrupt { .. }))
        ));
    }
}
