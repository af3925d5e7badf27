use crate::error::StoreError;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn ensure_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Key-unique records backed by a single pretty-printed JSON object.
///
/// The whole map is rewritten on every mutation. A mutation whose write fails
/// is undone in memory, so the map always mirrors the last successful write.
#[derive(Debug)]
pub struct JsonStore<R> {
    path: PathBuf,
    records: BTreeMap<String, R>,
}

impl<R> JsonStore<R>
where
    R: Serialize + DeserializeOwned,
{
    /// Loads the store at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        debug!("loaded {} records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn records(&self) -> &BTreeMap<String, R> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stores `record` under `key` and flushes, returning the replaced record.
    pub fn insert(&mut self, key: impl Into<String>, record: R) -> Result<Option<R>, StoreError> {
        let key = key.into();
        let previous = self.records.insert(key.clone(), record);
        if let Err(err) = self.flush() {
            match previous {
                Some(old) => {
                    self.records.insert(key, old);
                }
                None => {
                    self.records.remove(&key);
                }
            }
            return Err(err);
        }
        Ok(previous)
    }

    /// Drops `key` and flushes. Absent keys are not written.
    pub fn remove(&mut self, key: &str) -> Result<Option<R>, StoreError> {
        let Some(removed) = self.records.remove(key) else {
            return Ok(None);
        };
        if let Err(err) = self.flush() {
            self.records.insert(key.to_string(), removed);
            return Err(err);
        }
        Ok(Some(removed))
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records).map_err(StoreError::Encode)?;
        ensure_dir(&self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        body: String,
    }

    fn note(body: &str) -> Note {
        Note { body: body.to_string() }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store: JsonStore<Note> = JsonStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.is_empty());
        assert!(!dir.path().join("none.json").exists());
    }

    #[test]
    fn blank_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let store: JsonStore<Note> = JsonStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonStore::<Note>::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn insert_writes_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.insert("a", note("first")).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"a\": {\n    \"body\": \"first\"\n  }\n}");
    }

    #[test]
    fn insert_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("notes.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.insert("a", note("x")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reload_reproduces_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.insert("zeta", note("z")).unwrap();
        store.insert("alpha", note("a")).unwrap();
        store.insert("Mid", note("m")).unwrap();

        let reloaded: JsonStore<Note> = JsonStore::open(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.keys().collect::<Vec<_>>(), vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn insert_returns_replaced_record() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::open(dir.path().join("notes.json")).unwrap();
        assert_eq!(store.insert("k", note("one")).unwrap(), None);
        assert_eq!(store.insert("k", note("two")).unwrap(), Some(note("one")));
        assert_eq!(store.get("k"), Some(&note("two")));
    }

    #[test]
    fn remove_persists_and_ignores_absent_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.insert("k", note("v")).unwrap();

        assert_eq!(store.remove("missing").unwrap(), None);
        assert_eq!(store.remove("k").unwrap(), Some(note("v")));

        let reloaded: JsonStore<Note> = JsonStore::open(&path).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn failed_write_rolls_back() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let mut store: JsonStore<Note> = JsonStore {
            path: path.clone(),
            records: BTreeMap::new(),
        };

        let err = store.insert("k", note("v")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_remove_keeps_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let mut store = JsonStore {
            path,
            records: BTreeMap::from([("k".to_string(), note("v"))]),
        };

        let err = store.remove("k").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.get("k"), Some(&note("v")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_replace_restores_previous_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let mut store = JsonStore {
            path,
            records: BTreeMap::from([("k".to_string(), note("old"))]),
        };

        assert!(store.insert("k", note("new")).is_err());
        assert_eq!(store.get("k"), Some(&note("old")));
    }
}
