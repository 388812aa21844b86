//! Locally stored API key.
//!
//! The key lives in a small JSON object on disk (`{"gemini_api_key": "..."}`)
//! and is only ever sent to the text service itself.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage entry name for the text-service key.
pub const GEMINI_API_KEY: &str = "gemini_api_key";

/// Error reading or writing the credential file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    pub message: String,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Holder of the single API key. Empty or whitespace keys count as absent.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;

    fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}

fn non_empty(key: &str) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Key/value JSON file under the app directory.
///
/// The file is read once, on first access, and written on every change.
/// Later reads are served from memory.
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

fn poisoned() -> StorageError {
    StorageError {
        message: "credential lock poisoned".to_string(),
    }
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// `credentials.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| match serde_json::from_str(&s) {
                Ok(map) => Some(map),
                Err(e) => {
                    log::warn!("Ignoring unreadable {}: {}", self.path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError {
                message: format!("Cannot create {}: {}", parent.display(), e),
            })?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError {
            message: format!("Cannot encode credentials: {}", e),
        })?;
        std::fs::write(&self.path, json).map_err(|e| StorageError {
            message: format!("Cannot write {}: {}", self.path.display(), e),
        })
    }

    /// Apply `change` to the entries. When it reports a change, the file is
    /// written first and the cache only follows a successful write.
    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<bool, StorageError> {
        let mut slot = self.entries.lock().map_err(|_| poisoned())?;
        let mut entries = match slot.as_ref() {
            Some(cached) => cached.clone(),
            None => self.load(),
        };
        let changed = change(&mut entries);
        if changed {
            self.write(&entries)?;
        }
        *slot = Some(entries);
        Ok(changed)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        let mut slot = self.entries.lock().ok()?;
        slot.get_or_insert_with(|| self.load())
            .get(GEMINI_API_KEY)
            .and_then(|k| non_empty(k))
    }

    fn set(&self, key: &str) -> Result<(), StorageError> {
        let Some(key) = non_empty(key) else {
            return self.clear();
        };
        self.update(|entries| {
            entries.insert(GEMINI_API_KEY.to_string(), key);
            true
        })?;
        log::info!("Stored API key in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.update(|entries| entries.remove(GEMINI_API_KEY).is_some())? {
            log::info!("Cleared API key from {}", self.path.display());
        }
        Ok(())
    }
}

/// In-process store, for tests and sessions that should not touch disk.
#[derive(Default)]
pub struct MemoryCredentialStore {
    key: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(non_empty(key)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.key.lock().ok().and_then(|k| k.clone())
    }

    fn set(&self, key: &str) -> Result<(), StorageError> {
        let mut slot = self.key.lock().map_err(|_| poisoned())?;
        *slot = non_empty(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.set("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hive-popup-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn file_store_round_trip() {
        let dir = scratch_dir("roundtrip");
        let store = FileCredentialStore::in_dir(&dir);
        assert_eq!(store.get(), None);

        store.set("  abc123  ").unwrap();
        assert_eq!(store.get(), Some("abc123".to_string()));

        // Another handle on the same file sees the key
        let again = FileCredentialStore::in_dir(&dir);
        assert!(again.is_configured());

        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert_eq!(FileCredentialStore::in_dir(&dir).get(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_keeps_other_entries() {
        let dir = scratch_dir("others");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("credentials.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        store.set("k").unwrap();
        store.clear().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.get("theme").map(String::as_str), Some("dark"));
        assert!(!map.contains_key(GEMINI_API_KEY));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("credentials.json"), "not json").unwrap();
        let store = FileCredentialStore::in_dir(&dir);
        assert_eq!(store.get(), None);
        store.set("fresh").unwrap();
        assert_eq!(store.get(), Some("fresh".to_string()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_is_read_once() {
        let dir = scratch_dir("cached");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        for _ in 0..100 {
            assert_eq!(store.get(), None);
        }

        // Edits behind the store's back are not picked up by later reads
        std::fs::write(&path, r#"{"gemini_api_key":"outside"}"#).unwrap();
        assert!(!store.is_configured());

        // Writes go through to disk
        store.set("inside").unwrap();
        assert_eq!(FileCredentialStore::new(&path).get(), Some("inside".to_string()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn blank_key_counts_as_absent() {
        let store = MemoryCredentialStore::with_key("   ");
        assert!(!store.is_configured());
        store.set("real").unwrap();
        assert!(store.is_configured());
        store.clear().unwrap();
        assert!(!store.is_configured());
    }
}
