//! File-backed session storage.
//!
//! Persists the session keys as a single flat JSON object. Reads of a
//! missing or corrupt file behave as an empty store, and write failures are
//! logged rather than raised; a broken session file must never take the
//! client down, it just means logging in again.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use autoguide_core::traits::storage::SessionStorage;

/// JSON-object file store. The lock serializes read-modify-write cycles
/// within this process; cross-process writes are last-write-wins.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates a store over the given file path. The file (and its parent
    /// directory) is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> HashMap<String, String> {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Corrupt session file, treating as empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), error = %e, "Failed to create session directory");
                    return;
                }
            }
        }

        match serde_json::to_vec_pretty(entries) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&self.path, bytes) {
                    warn!(path = %self.path.display(), error = %e, "Failed to persist session file");
                } else {
                    debug!(path = %self.path.display(), "Session file updated");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session entries"),
        }
    }

    /// The file path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileSessionStorage::new(&path);
        storage.set("ag_access_token", "tok");
        storage.set("ag_username", "alice");

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(reopened.get("ag_access_token").as_deref(), Some("tok"));
        assert_eq!(reopened.get("ag_username").as_deref(), Some("alice"));

        reopened.remove("ag_access_token");
        assert_eq!(storage.get("ag_access_token"), None);
        assert_eq!(storage.get("ag_username").as_deref(), Some("alice"));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("ag_access_token"), None);
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{ not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        assert_eq!(storage.get("ag_username"), None);

        storage.set("ag_username", "bob");
        assert_eq!(storage.get("ag_username").as_deref(), Some("bob"));
    }

    #[test]
    fn creates_parent_directories_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("session.json");
        let storage = FileSessionStorage::new(&path);
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }
}
