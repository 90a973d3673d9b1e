// Persisted key/value storage for the session, the terminal counterpart of
// browser local storage.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;

/// String key/value store the session is persisted in
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-lifetime storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// JSON file storage (~/.sports-console/session.json)
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Default session file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::home_dir()?.join("session.json"))
    }

    /// Open the store, reading existing entries if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).context("Failed to read session file")?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).context("Failed to parse session file")?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened session store at {:?}", path);

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create session directory")?;
        }

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize session")?;
        fs::write(&self.path, contents).context("Failed to write session file")?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        let previous = entries.insert(key.to_string(), value.to_string());

        self.flush(&entries).inspect_err(|_| {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        self.flush(&entries).inspect_err(|_| {
            entries.insert(key.to_string(), previous);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() -> Result<()> {
        let store = MemoryStore::new();
        assert!(store.get("token").is_none());

        store.set("token", "abc")?;
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        store.remove("token")?;
        assert!(store.get("token").is_none());

        Ok(())
    }

    #[test]
    fn test_file_store_persists_across_opens() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path)?;
        store.set("token", "abc")?;
        store.set("user", r#"{"id":1}"#)?;
        drop(store);

        let reopened = FileStore::open(&path)?;
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("user").as_deref(), Some(r#"{"id":1}"#));

        reopened.remove("token")?;
        let reopened = FileStore::open(&path)?;
        assert!(reopened.get("token").is_none());

        Ok(())
    }

    #[test]
    fn test_file_store_keeps_entries_when_write_fails() -> Result<()> {
        let dir = tempdir()?;
        // The parent is a regular file, so every flush fails
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "")?;

        let store = FileStore::open(blocker.join("session.json"))?;
        assert!(store.set("token", "abc").is_err());
        assert!(store.get("token").is_none());

        store.entries.lock().unwrap().insert("user".into(), "kept".into());
        assert!(store.remove("user").is_err());
        assert_eq!(store.get("user").as_deref(), Some("kept"));

        Ok(())
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "not json")?;

        assert!(FileStore::open(&path).is_err());
        Ok(())
    }
}
